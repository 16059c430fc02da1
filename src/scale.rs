//! Y-scale: the linear value-to-pixel mapping of the chart.
//!
//! The scale always starts at zero (bars grow from the baseline) and tops out
//! at the data maximum plus a configured headroom. A previous scale is kept
//! while the new maximum stays within that headroom, so small data updates do
//! not rescale every bar.

use crate::config::{ChartOptions, YScaleOptions};
use crate::data::Series;
use crate::error::{Error, Result};
use crate::geometry::DrawSurface;

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear y-scale: `pixels = (value - min) * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YScale {
    /// Pixels per value unit.
    pub scale: f64,
    /// Value at the baseline.
    pub min: f64,
    /// Value at the top of the drawable area.
    pub max: f64,
}

impl YScale {
    /// Create a scale from explicit parts.
    #[must_use]
    pub const fn new(scale: f64, min: f64, max: f64) -> Self {
        Self { scale, min, max }
    }

    /// Fit `[min, max]` into `height` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateScale`] if the result is not finite and positive.
    pub fn fit(min: f64, max: f64, height: f64) -> Result<Self> {
        let scale = height / (max - min);
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::DegenerateScale { max, min });
        }
        Ok(Self { scale, min, max })
    }

    /// Pixel height of a bar with `value`.
    #[must_use]
    pub fn height_of(&self, value: f64) -> f64 {
        value * self.scale
    }
}

impl Scale<f64, f64> for YScale {
    fn scale(&self, value: f64) -> f64 {
        (value - self.min) * self.scale
    }

    fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    fn range(&self) -> (f64, f64) {
        (0.0, (self.max - self.min) * self.scale)
    }
}

/// Whether `data_max` lies strictly inside `(prior.max - top_gutter, prior.max)`.
#[must_use]
pub fn within_hysteresis(prior: &YScale, data_max: f64, top_gutter: f64) -> bool {
    prior.max - top_gutter < data_max && data_max < prior.max
}

fn manual_scale(opts: &YScaleOptions, surface: &DrawSurface) -> Option<YScale> {
    let scale = opts.scale?;
    let min = opts.min.unwrap_or(0.0);
    let max = opts.max.unwrap_or(min + surface.height() / scale);
    Some(YScale { scale, min, max })
}

/// Compute the y-scale for `series`.
///
/// With `yscale.auto` off, an explicit `yscale.scale` is returned untouched,
/// else a prior scale is retained; only when neither exists is the scale
/// derived from data. In auto mode the prior is retained while the data
/// maximum sits inside its headroom band, otherwise the scale is refitted to
/// `[0, max + top_gutter]`.
///
/// # Errors
///
/// Returns [`Error::DegenerateScale`] when all values are zero and
/// `yscale.top_gutter` is zero, or any other range yielding a non-finite scale.
pub fn compute_yscale(
    series: &Series,
    opts: &ChartOptions,
    surface: &DrawSurface,
    prior: Option<&YScale>,
) -> Result<YScale> {
    let yopts = &opts.yscale;

    if !yopts.auto {
        if let Some(manual) = manual_scale(yopts, surface) {
            tracing::debug!(scale = manual.scale, max = manual.max, "manual y-scale");
            return Ok(manual);
        }
        if let Some(prior) = prior {
            tracing::debug!(scale = prior.scale, max = prior.max, "y-scale frozen at prior");
            return Ok(*prior);
        }
    }

    let max = series.max_value();
    let min = 0.0;

    if let Some(prior) = prior {
        if within_hysteresis(prior, max, yopts.top_gutter) {
            tracing::debug!(data_max = max, prior_max = prior.max, "y-scale retained");
            return Ok(*prior);
        }
    }

    let yscale = YScale::fit(min, max + yopts.top_gutter, surface.height())?;
    tracing::debug!(data_max = max, scale = yscale.scale, max = yscale.max, "y-scale recomputed");
    Ok(yscale)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Bars never exceed the drawable height when the scale is refitted.
        #[test]
        fn prop_refit_bars_fit_surface(
            values in prop::collection::vec(0.0f64..1e6, 1..50),
            top_gutter in 0.1f64..1000.0,
        ) {
            let mut opts = ChartOptions::default();
            opts.yscale.top_gutter = top_gutter;
            let surface = DrawSurface::new(22.0, 20.0, 380.0, 260.0);
            let series = Series::flat(&values);

            let y = compute_yscale(&series, &opts, &surface, None).unwrap();
            for v in &values {
                prop_assert!(y.height_of(*v) <= surface.height() + 1e-6);
            }
        }

        /// A scale computed from data is retained when the same data comes back.
        #[test]
        fn prop_recompute_is_stable(
            values in prop::collection::vec(0.0f64..1e4, 1..20),
            top_gutter in 0.1f64..100.0,
        ) {
            let mut opts = ChartOptions::default();
            opts.yscale.top_gutter = top_gutter;
            let surface = DrawSurface::new(22.0, 20.0, 380.0, 260.0);
            let series = Series::flat(&values);

            let first = compute_yscale(&series, &opts, &surface, None).unwrap();
            let second = compute_yscale(&series, &opts, &surface, Some(&first)).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}

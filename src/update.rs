//! Re-layout of an existing bar set on data refresh.
//!
//! An update never adds or removes bars. The n-th delta belongs to the n-th
//! bar of the previous layout (groups flattened left to right), so an
//! animator can transition each bar from its old attributes to the new ones.

use crate::data::{Series, Style};
use crate::error::{Error, Result};
use crate::geometry::DrawSurface;
use crate::layout::{bar_extent, BarGeometry};
use crate::scale::YScale;

/// New vertical extent and style for one existing bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarDelta {
    /// New top edge.
    pub y: f64,
    /// New height.
    pub height: f64,
    /// Style of the new data point.
    pub style: Style,
}

impl BarDelta {
    /// Attribute map for a surface's `animate`/`set_attributes`.
    #[must_use]
    pub fn to_attributes(&self) -> Style {
        let mut attrs = self.style.clone();
        attrs.insert("y".into(), self.y.into());
        attrs.insert("height".into(), self.height.into());
        attrs
    }

    /// `bar` with this delta applied.
    #[must_use]
    pub fn apply(&self, bar: &BarGeometry) -> BarGeometry {
        let mut style = bar.style.clone();
        style.extend(self.style.iter().map(|(k, v)| (k.clone(), v.clone())));
        BarGeometry { x: bar.x, y: self.y, width: bar.width, height: self.height, style }
    }
}

/// Deltas taking `prior` to the values of `series` under `yscale`.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if `series` does not have exactly as many
/// bars as `prior`.
pub fn diff(series: &Series, prior: &[BarGeometry], yscale: &YScale, surface: &DrawSurface) -> Result<Vec<BarDelta>> {
    let actual = series.bar_count();
    if actual != prior.len() {
        return Err(Error::ShapeMismatch { context: "update", expected: prior.len(), actual });
    }

    Ok(series
        .iter_points()
        .map(|point| {
            let (y, height) = bar_extent(point.value, yscale, surface);
            BarDelta { y, height, style: point.style.clone() }
        })
        .collect())
}

/// Geometry after applying `deltas` pairwise to `prior`.
#[must_use]
pub fn apply_all(prior: &[BarGeometry], deltas: &[BarDelta]) -> Vec<BarGeometry> {
    prior.iter().zip(deltas).map(|(bar, delta)| delta.apply(bar)).collect()
}

//! Bar and group spacing, explicit or derived from the available width.

use crate::config::ChartOptions;
use crate::data::Series;
use crate::geometry::DrawSurface;

/// Gaps used by the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    /// Gap before every bar of a flat series.
    pub bar: f64,
    /// Gap before every group of a grouped series.
    pub group: f64,
}

impl Spacing {
    /// Spacing exactly as configured.
    #[must_use]
    pub fn from_options(opts: &ChartOptions) -> Self {
        Self { bar: opts.spacing.bar, group: opts.spacing.group }
    }
}

/// Overrides produced by auto-spacing; `None` keeps the configured value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AutoSpacing {
    /// Derived bar gap (flat series).
    pub bar: Option<f64>,
    /// Derived group gap (grouped series).
    pub group: Option<f64>,
}

/// Derive gaps that spread `element_count` elements evenly over `surface_width`.
///
/// Flat: `floor((width - n*bar_width) / (n + 1))`, equal gaps before, between
/// and after every bar. Grouped: every bar of every group counts toward the
/// occupied width, and the free space is split over `groups + 1` gaps.
/// Overcrowded data yields negative gaps, which are returned as-is.
#[must_use]
pub fn auto_spacing(
    element_count: usize,
    per_group: Option<usize>,
    bar_width: f64,
    surface_width: f64,
) -> AutoSpacing {
    match per_group {
        None => {
            let free = surface_width - element_count as f64 * bar_width;
            AutoSpacing { bar: Some((free / (element_count + 1) as f64).floor()), group: None }
        }
        Some(per_group) => {
            let total_bars = element_count * per_group;
            let free = surface_width - total_bars as f64 * bar_width;
            AutoSpacing { bar: None, group: Some((free / (element_count + 1) as f64).floor()) }
        }
    }
}

/// Spacing for laying out `series`: derived when `auto_size` is on, else configured.
#[must_use]
pub fn resolve_spacing(series: &Series, opts: &ChartOptions, surface: &DrawSurface) -> Spacing {
    let mut spacing = Spacing::from_options(opts);
    if !opts.auto_size {
        return spacing;
    }

    let auto = auto_spacing(series.len(), series.per_group(), opts.bar.width, surface.width());
    if let Some(bar) = auto.bar {
        spacing.bar = bar;
    }
    if let Some(group) = auto.group {
        spacing.group = group;
    }

    if spacing.bar < 0.0 || spacing.group < 0.0 {
        tracing::warn!(bar = spacing.bar, group = spacing.group, "auto-spacing overcrowded");
    } else {
        tracing::debug!(bar = spacing.bar, group = spacing.group, "auto-spacing");
    }
    spacing
}

//! Axis lines and the y-axis tick.
//!
//! Only a single tick is planned: the value reached at the top of the
//! drawable area. It is redrawn only when the scale's maximum changes.

use crate::config::ChartOptions;
use crate::geometry::{DrawSurface, PathSpec, Size};
use crate::scale::YScale;

/// Length of the tick mark left of the y axis.
const TICK_LENGTH: f64 = 5.0;
/// Gap between the tick label's end and the y axis.
const TICK_LABEL_GAP: f64 = 7.0;

/// Outcome of tick planning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickPlan {
    /// Whether tick shapes must be (re)drawn.
    pub redraw: bool,
    /// Value shown by the tick; set only when redrawing.
    pub tick_value: Option<f64>,
}

/// Decide whether ticks must be redrawn for `new`.
///
/// Redraw when nothing is drawn yet, when there is no prior scale, or when
/// the maximum changed.
#[must_use]
pub fn plan_ticks(new: &YScale, prior: Option<&YScale>, has_ticks: bool, surface: &DrawSurface) -> TickPlan {
    let redraw = !has_ticks || prior.map_or(true, |p| p.max != new.max);
    let tick_value = redraw.then(|| (surface.height() / new.scale).round());
    tracing::debug!(redraw, ?tick_value, "tick plan");
    TickPlan { redraw, tick_value }
}

/// Placement of the tick mark and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Displayed value.
    pub value: f64,
    /// Short horizontal mark left of the y axis.
    pub mark: PathSpec,
    /// Label anchor x (text is end-anchored).
    pub label_x: f64,
    /// Vertical position of mark and label.
    pub y: f64,
}

impl Tick {
    /// Tick for `value` under `yscale`.
    #[must_use]
    pub fn new(value: f64, yscale: &YScale, surface: &DrawSurface, opts: &ChartOptions) -> Self {
        let y = surface.bottom - yscale.height_of(value);
        let axis_x = opts.graph.left_gutter;
        Self {
            value,
            mark: PathSpec::horizontal(axis_x - TICK_LENGTH, y, axis_x),
            label_x: axis_x - TICK_LABEL_GAP,
            y,
        }
    }

    /// Label text.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{}", self.value)
    }
}

/// The x and y axis lines along the bottom and left gutters.
#[must_use]
pub fn axis_lines(opts: &ChartOptions, canvas: Size) -> [PathSpec; 2] {
    let g = &opts.graph;
    let x_bottom = canvas.height - g.bottom_gutter;
    [
        PathSpec::horizontal(g.left_gutter, x_bottom, canvas.width - g.right_gutter),
        PathSpec::vertical(g.left_gutter, g.top_gutter, x_bottom),
    ]
}

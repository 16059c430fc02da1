//! # Bar-Viz
//!
//! Bar-chart layout and scale engine with pluggable rendering surfaces.
//!
//! Values go in as flat or grouped series; out come pixel rectangles, label
//! anchors and a y-axis tick, drawn onto any [`surface::RenderSurface`].
//! Subsequent updates move the existing bars instead of redrawing them, and
//! the y-scale only refits when the data leaves its hysteresis band.
//!
//! ## Features
//!
//! - **Flat and grouped series** from numbers or styled JSON records
//! - **Stable y-scale**: small changes in the maximum keep the current scale
//! - **Auto-spacing** that fills the drawable width
//! - **Multiple Surfaces**: in-memory recording and SVG (with SMIL animation)
//!
//! ## Quick Start
//!
//! ```rust
//! use bar_viz::prelude::*;
//!
//! let mut chart = BarChart::create(SvgSurface::new(400.0, 282.0), ChartOptions::default())?;
//! let labels: Vec<String> = ["a", "b", "c"].iter().map(ToString::to_string).collect();
//! chart.draw(&Series::flat(&[10.0, 20.0, 5.0]), &labels)?;
//! chart.update(&Series::flat(&[12.0, 18.0, 7.0]), true)?;
//!
//! let svg = chart.surface().render();
//! assert!(svg.contains("<animate"));
//! # Ok::<(), bar_viz::Error>(())
//! ```

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and color parsing.
pub mod color;

/// Chart options and their YAML loader.
pub mod config;

/// Series input and normalization.
pub mod data;

/// Geometric primitives (sizes, rectangles, paths).
pub mod geometry;

/// Y-scale fitting and hysteresis.
pub mod scale;

// ============================================================================
// Layout Modules
// ============================================================================

/// Bar and group spacing.
pub mod spacing;

/// Bar geometry and label placement.
pub mod layout;

/// Axis lines and tick planning.
pub mod axis;

/// Update deltas for existing bars.
pub mod update;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rendering surface abstraction.
pub mod surface;

/// Concrete surfaces (SVG).
pub mod output;

/// Chart instance tying layout to a surface.
pub mod chart;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for bar-viz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use bar_viz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chart::BarChart;
    pub use crate::color::{Hsla, Rgba};
    pub use crate::config::ChartOptions;
    pub use crate::data::{DataPoint, Series, Style};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{BoundingBox, DrawSurface, PathSpec, Size};
    pub use crate::layout::{BarGeometry, LabelAnchor, Layout};
    pub use crate::output::SvgSurface;
    pub use crate::scale::{Scale, YScale};
    pub use crate::spacing::Spacing;
    pub use crate::surface::{RecordingSurface, RenderSurface, ShapeHandle};
    pub use crate::update::BarDelta;
}

// ============================================================================
// Tests
// ============================================================================

//! Chart options and their resolution against defaults.
//!
//! Every nested record carries serde defaults, so deserializing a partial
//! YAML document is a deep merge over the defaults: user values win at every
//! nesting level, missing keys fall back, unknown keys are ignored.
//!
//! No range validation is performed. Negative gutters or widths are accepted
//! and simply produce visually wrong geometry.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Outer margins of the canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphOptions {
    /// Margin above the drawable area.
    #[serde(default = "default_gutter")]
    pub top_gutter: f64,
    /// Margin right of the drawable area.
    #[serde(default = "default_gutter")]
    pub right_gutter: f64,
    /// Margin below the x axis.
    #[serde(default = "default_gutter")]
    pub bottom_gutter: f64,
    /// Margin left of the y axis.
    #[serde(default = "default_gutter")]
    pub left_gutter: f64,
}

fn default_gutter() -> f64 {
    20.0
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            top_gutter: default_gutter(),
            right_gutter: default_gutter(),
            bottom_gutter: default_gutter(),
            left_gutter: default_gutter(),
        }
    }
}

/// Axis line options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    /// Stroke width of both axis lines.
    pub width: f64,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self { width: 2.0 }
    }
}

/// Label text options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelOptions {
    /// Font family handed to the surface.
    pub font: String,
    /// Font size in pixels.
    pub font_size: f64,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self { font: "Arial".to_string(), font_size: 12.0 }
    }
}

/// Bar options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarOptions {
    /// Width of a single bar.
    pub width: f64,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self { width: 20.0 }
    }
}

/// Explicit gaps between bars and groups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingOptions {
    /// Gap before every bar of a flat series.
    pub bar: f64,
    /// Gap before every group of a grouped series.
    pub group: f64,
}

impl Default for SpacingOptions {
    fn default() -> Self {
        Self { bar: 5.0, group: 10.0 }
    }
}

/// Y-scale options.
///
/// With `auto = false` and an explicit `scale`, the given `scale`/`min`/`max`
/// are authoritative and never recomputed from data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YScaleOptions {
    /// Headroom added on top of the data maximum, in value units.
    pub top_gutter: f64,
    /// Derive the scale from data.
    pub auto: bool,
    /// Explicit pixels-per-unit.
    pub scale: Option<f64>,
    /// Explicit value at the baseline.
    pub min: Option<f64>,
    /// Explicit value at the top of the drawable area.
    pub max: Option<f64>,
}

impl Default for YScaleOptions {
    fn default() -> Self {
        Self { top_gutter: 10.0, auto: true, scale: None, min: None, max: None }
    }
}

/// Animated update options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    /// Duration handed to the surface's `animate`.
    pub duration_ms: u64,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self { duration_ms: 500 }
    }
}

/// Fully resolved chart configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Canvas gutters.
    #[serde(default)]
    pub graph: GraphOptions,
    /// Axis lines.
    #[serde(default)]
    pub axis: AxisOptions,
    /// Label text.
    #[serde(default)]
    pub labels: LabelOptions,
    /// Derive spacing from the available width instead of `spacing`.
    #[serde(default)]
    pub auto_size: bool,
    /// Bars.
    #[serde(default)]
    pub bar: BarOptions,
    /// Explicit spacing, used when `auto_size` is off.
    #[serde(default)]
    pub spacing: SpacingOptions,
    /// Y-scale.
    #[serde(default)]
    pub yscale: YScaleOptions,
    /// Update animation.
    #[serde(default)]
    pub animation: AnimationOptions,
}

impl ChartOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a (possibly partial) YAML option document over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Resolves optional user options: absent or blank means all defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-blank document fails to parse.
    pub fn resolve(user: Option<&str>) -> Result<Self> {
        match user {
            Some(doc) if !doc.trim().is_empty() => Self::parse(doc),
            _ => Ok(Self::default()),
        }
    }

    /// Loads options from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::resolve(Some(&content))
    }

    /// Loads options with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Builder-style toggle for auto-spacing.
    #[must_use]
    pub fn with_auto_size(mut self, auto_size: bool) -> Self {
        self.auto_size = auto_size;
        self
    }
}

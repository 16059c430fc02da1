//! Geometric primitives shared by the layout engine and surfaces.
//!
//! All coordinates are pixels with the origin at the top-left of the canvas
//! and y growing downwards.

use crate::config::ChartOptions;
use std::fmt;

/// Canvas dimensions reported by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The rectangle available for bars once gutters and the axis are taken out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawSurface {
    /// Left edge (just right of the y axis).
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge (the bar baseline, just above the x axis).
    pub bottom: f64,
}

impl DrawSurface {
    /// Create a draw surface from explicit edges.
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Derive the draw surface from canvas size, gutters and axis width.
    #[must_use]
    pub fn from_canvas(canvas: Size, opts: &ChartOptions) -> Self {
        Self {
            left: opts.graph.left_gutter + opts.axis.width,
            top: opts.graph.top_gutter,
            right: canvas.width - opts.graph.right_gutter,
            bottom: canvas.height - (opts.graph.bottom_gutter + opts.axis.width),
        }
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent, i.e. the pixel height of the full value range.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Axis-aligned bounding box as reported by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Right edge.
    pub x2: f64,
    /// Bottom edge.
    pub y2: f64,
}

impl BoundingBox {
    /// Create a bounding box from its corners.
    #[must_use]
    pub const fn new(x: f64, y: f64, x2: f64, y2: f64) -> Self {
        Self { x, y, x2, y2 }
    }

    /// Bounding box of a `x, y, width, height` rectangle.
    #[must_use]
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.x2.max(other.x2),
            self.y2.max(other.y2),
        )
    }

    /// Horizontal midpoint.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        (self.x + self.x2) / 2.0
    }

    /// Width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x2 - self.x
    }
}

/// One step of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Move the pen.
    MoveTo(f64, f64),
    /// Straight line to a point.
    LineTo(f64, f64),
    /// Horizontal line to an x.
    HorizontalTo(f64),
    /// Vertical line to a y.
    VerticalTo(f64),
}

/// A path description understood by surfaces, rendered as SVG path data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathSpec {
    /// Path commands in drawing order.
    pub commands: Vec<PathCommand>,
}

impl PathSpec {
    /// Horizontal segment from `(x, y)` to `(x2, y)`.
    #[must_use]
    pub fn horizontal(x: f64, y: f64, x2: f64) -> Self {
        Self { commands: vec![PathCommand::MoveTo(x, y), PathCommand::HorizontalTo(x2)] }
    }

    /// Vertical segment from `(x, y)` to `(x, y2)`.
    #[must_use]
    pub fn vertical(x: f64, y: f64, y2: f64) -> Self {
        Self { commands: vec![PathCommand::MoveTo(x, y), PathCommand::VerticalTo(y2)] }
    }

    /// Bounding box of the path's vertices.
    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        let mut pen = (0.0, 0.0);
        let mut bounds: Option<BoundingBox> = None;
        for cmd in &self.commands {
            pen = match *cmd {
                PathCommand::MoveTo(x, y) | PathCommand::LineTo(x, y) => (x, y),
                PathCommand::HorizontalTo(x) => (x, pen.1),
                PathCommand::VerticalTo(y) => (pen.0, y),
            };
            let point = BoundingBox::new(pen.0, pen.1, pen.0, pen.1);
            bounds = Some(bounds.map_or(point, |b| b.union(point)));
        }
        bounds.unwrap_or_default()
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(x, y) => write!(f, "M{x},{y}")?,
                PathCommand::LineTo(x, y) => write!(f, "L{x},{y}")?,
                PathCommand::HorizontalTo(x) => write!(f, "H{x}")?,
                PathCommand::VerticalTo(y) => write!(f, "V{y}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_surface_from_canvas() {
        let opts = ChartOptions::default();
        let ds = DrawSurface::from_canvas(Size::new(400.0, 300.0), &opts);
        assert_eq!(ds, DrawSurface::new(22.0, 20.0, 380.0, 258.0));
        assert_eq!(ds.width(), 358.0);
        assert_eq!(ds.height(), 238.0);
    }

    #[test]
    fn test_bounding_box_union() {
        let a = BoundingBox::from_rect(10.0, 50.0, 20.0, 30.0);
        let b = BoundingBox::from_rect(30.0, 20.0, 20.0, 60.0);
        let u = a.union(b);
        assert_eq!(u, BoundingBox::new(10.0, 20.0, 50.0, 80.0));
        assert_eq!(u.center_x(), 30.0);
        assert_eq!(u.width(), 40.0);
    }

    #[test]
    fn test_path_display() {
        assert_eq!(PathSpec::horizontal(20.0, 280.0, 380.0).to_string(), "M20,280H380");
        assert_eq!(PathSpec::vertical(20.0, 20.0, 280.0).to_string(), "M20,20V280");
    }

    #[test]
    fn test_path_bounds() {
        let path = PathSpec::vertical(20.0, 20.0, 280.0);
        assert_eq!(path.bounds(), BoundingBox::new(20.0, 20.0, 20.0, 280.0));
        assert_eq!(PathSpec::default().bounds(), BoundingBox::default());
    }
}

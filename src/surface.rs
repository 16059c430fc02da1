//! The rendering surface the chart paints on.
//!
//! The layout engine never rasterizes anything itself: it hands computed
//! geometry to a [`RenderSurface`] and reads back bounding boxes. Two
//! implementations ship with the crate: [`RecordingSurface`] keeps shapes in
//! memory (headless layout, tests), and [`crate::output::SvgSurface`] builds
//! an SVG document.

use crate::data::Style;
use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, PathSpec, Size};
use serde_json::Value;

/// Opaque id of a shape drawn on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeHandle(pub usize);

/// Kind of a drawn shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Rectangle; geometry lives in the `x`/`y`/`width`/`height` attributes.
    Rect,
    /// Stroked path.
    Line(PathSpec),
    /// Text anchored at the `x`/`y` attributes.
    Text(String),
}

/// A drawing surface collaborator.
///
/// Attribute maps use SVG attribute names (`fill`, `stroke`,
/// `stroke-width`, `font-family`, `font-size`, `text-anchor`, plus the
/// geometry keys `x`, `y`, `width`, `height`).
pub trait RenderSurface {
    /// Canvas dimensions.
    fn measure(&self) -> Size;

    /// Draw a rectangle.
    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &Style) -> Result<ShapeHandle>;

    /// Draw a stroked path.
    fn draw_line(&mut self, path: &PathSpec, style: &Style) -> Result<ShapeHandle>;

    /// Draw text anchored at `(x, y)`.
    fn draw_text(&mut self, x: f64, y: f64, content: &str, style: &Style) -> Result<ShapeHandle>;

    /// Rendered bounds of a live shape.
    fn bounding_box(&self, handle: ShapeHandle) -> Option<BoundingBox>;

    /// Transition a shape's attributes over `duration_ms`.
    fn animate(&mut self, handle: ShapeHandle, delta: &Style, duration_ms: u64) -> Result<()>;

    /// Apply attributes immediately.
    fn set_attributes(&mut self, handle: ShapeHandle, delta: &Style) -> Result<()>;

    /// Remove a shape; removing an unknown handle is a no-op.
    fn remove(&mut self, handle: ShapeHandle);
}

/// Numeric attribute, `0.0` if absent or not a number.
#[must_use]
pub fn number_attr(attrs: &Style, key: &str) -> f64 {
    attrs.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Estimated bounds of a single line of text.
///
/// Glyph advance is approximated as `0.6 * font_size`; `(x, y)` is the
/// baseline point, shifted per `text-anchor`.
#[must_use]
pub fn estimate_text_bounds(x: f64, y: f64, content: &str, attrs: &Style) -> BoundingBox {
    let font_size = attrs.get("font-size").and_then(Value::as_f64).unwrap_or(12.0);
    let width = content.chars().count() as f64 * font_size * 0.6;
    let left = match attrs.get("text-anchor").and_then(Value::as_str) {
        Some("middle") => x - width / 2.0,
        Some("end") => x - width,
        _ => x,
    };
    BoundingBox::new(left, y - font_size, left + width, y)
}

fn rect_attrs(x: f64, y: f64, width: f64, height: f64, style: &Style) -> Style {
    let mut attrs = style.clone();
    attrs.insert("x".into(), x.into());
    attrs.insert("y".into(), y.into());
    attrs.insert("width".into(), width.into());
    attrs.insert("height".into(), height.into());
    attrs
}

/// A shape held by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedShape {
    /// What was drawn.
    pub kind: ShapeKind,
    /// Current attributes, geometry included.
    pub attributes: Style,
}

impl RecordedShape {
    /// Current bounds.
    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        let a = &self.attributes;
        match &self.kind {
            ShapeKind::Rect => BoundingBox::from_rect(
                number_attr(a, "x"),
                number_attr(a, "y"),
                number_attr(a, "width"),
                number_attr(a, "height"),
            ),
            ShapeKind::Line(path) => path.bounds(),
            ShapeKind::Text(content) => {
                estimate_text_bounds(number_attr(a, "x"), number_attr(a, "y"), content, a)
            }
        }
    }
}

/// An animation requested on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedAnimation {
    /// Animated shape.
    pub handle: ShapeHandle,
    /// Target attributes.
    pub delta: Style,
    /// Requested duration.
    pub duration_ms: u64,
}

/// In-memory surface recording every shape and attribute change.
///
/// Animations jump to their end state immediately; the request is kept in
/// [`RecordingSurface::animations`].
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    shapes: Vec<Option<RecordedShape>>,
    animations: Vec<RecordedAnimation>,
}

impl RecordingSurface {
    /// Create an empty surface of the given canvas size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { size: Size::new(width, height), shapes: Vec::new(), animations: Vec::new() }
    }

    fn push(&mut self, kind: ShapeKind, attributes: Style) -> ShapeHandle {
        self.shapes.push(Some(RecordedShape { kind, attributes }));
        ShapeHandle(self.shapes.len() - 1)
    }

    fn live_mut(&mut self, handle: ShapeHandle) -> Result<&mut RecordedShape> {
        self.shapes
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownShape(handle.0))
    }

    /// A live shape.
    #[must_use]
    pub fn shape(&self, handle: ShapeHandle) -> Option<&RecordedShape> {
        self.shapes.get(handle.0).and_then(Option::as_ref)
    }

    /// Live shapes in drawing order.
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeHandle, &RecordedShape)> + '_ {
        self.shapes
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (ShapeHandle(i), s)))
    }

    /// Live rectangles in drawing order.
    pub fn rects(&self) -> impl Iterator<Item = &RecordedShape> + '_ {
        self.shapes().map(|(_, s)| s).filter(|s| s.kind == ShapeKind::Rect)
    }

    /// Live text contents in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.shapes().filter_map(|(_, s)| match &s.kind {
            ShapeKind::Text(content) => Some(content.as_str()),
            _ => None,
        })
    }

    /// Every animation requested so far.
    #[must_use]
    pub fn animations(&self) -> &[RecordedAnimation] {
        &self.animations
    }

    /// Number of live shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes().count()
    }

    /// Whether no shape is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RenderSurface for RecordingSurface {
    fn measure(&self) -> Size {
        self.size
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &Style) -> Result<ShapeHandle> {
        Ok(self.push(ShapeKind::Rect, rect_attrs(x, y, width, height, style)))
    }

    fn draw_line(&mut self, path: &PathSpec, style: &Style) -> Result<ShapeHandle> {
        Ok(self.push(ShapeKind::Line(path.clone()), style.clone()))
    }

    fn draw_text(&mut self, x: f64, y: f64, content: &str, style: &Style) -> Result<ShapeHandle> {
        let mut attrs = style.clone();
        attrs.insert("x".into(), x.into());
        attrs.insert("y".into(), y.into());
        Ok(self.push(ShapeKind::Text(content.to_string()), attrs))
    }

    fn bounding_box(&self, handle: ShapeHandle) -> Option<BoundingBox> {
        self.shape(handle).map(RecordedShape::bounds)
    }

    fn animate(&mut self, handle: ShapeHandle, delta: &Style, duration_ms: u64) -> Result<()> {
        self.set_attributes(handle, delta)?;
        self.animations.push(RecordedAnimation { handle, delta: delta.clone(), duration_ms });
        Ok(())
    }

    fn set_attributes(&mut self, handle: ShapeHandle, delta: &Style) -> Result<()> {
        let shape = self.live_mut(handle)?;
        shape.attributes.extend(delta.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    fn remove(&mut self, handle: ShapeHandle) {
        if let Some(slot) = self.shapes.get_mut(handle.0) {
            *slot = None;
        }
    }
}

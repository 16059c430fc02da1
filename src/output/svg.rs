//! SVG rendering surface.
//!
//! Shapes are kept as attribute maps and serialized on [`SvgSurface::render`].
//! Paint strings are resolved to CSS colors when a shape is drawn, so an
//! unparseable fill fails the draw call rather than producing a broken
//! document. Animations become SMIL `<animate>` children that start from the
//! previous attribute value and freeze at the target.

use crate::color::Rgba;
use crate::data::Style;
use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, PathSpec, Size};
use crate::surface::{estimate_text_bounds, number_attr, RenderSurface, ShapeHandle, ShapeKind};
use serde_json::Value;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Attributes holding paint that must be resolved to a color.
const PAINT_ATTRIBUTES: [&str; 2] = ["fill", "stroke"];

#[derive(Debug, Clone)]
struct SvgAnimation {
    attribute: String,
    from: Option<Value>,
    to: Value,
    duration_ms: u64,
}

#[derive(Debug, Clone)]
struct SvgShape {
    kind: ShapeKind,
    attributes: Style,
    animations: Vec<SvgAnimation>,
}

/// A surface that renders to an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    shapes: Vec<Option<SvgShape>>,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(400.0, 300.0)
    }
}

impl SvgSurface {
    /// Create an empty SVG canvas.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, background: Some(Rgba::WHITE), shapes: Vec::new() }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    fn push(&mut self, kind: ShapeKind, attributes: Style) -> Result<ShapeHandle> {
        validate_paint(&attributes)?;
        self.shapes.push(Some(SvgShape { kind, attributes, animations: Vec::new() }));
        Ok(ShapeHandle(self.shapes.len() - 1))
    }

    fn live_mut(&mut self, handle: ShapeHandle) -> Result<&mut SvgShape> {
        self.shapes
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownShape(handle.0))
    }

    /// Number of live shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.iter().flatten().count()
    }

    /// Whether no shape is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, bg.to_css());
        }

        for shape in self.shapes.iter().flatten() {
            let _ = writeln!(svg, "  {}", shape_to_svg(shape));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

impl RenderSurface for SvgSurface {
    fn measure(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &Style) -> Result<ShapeHandle> {
        let mut attrs = style.clone();
        attrs.entry("fill".to_string()).or_insert_with(|| Rgba::STEEL_BLUE.to_css().into());
        attrs.insert("x".into(), x.into());
        attrs.insert("y".into(), y.into());
        attrs.insert("width".into(), width.into());
        attrs.insert("height".into(), height.into());
        self.push(ShapeKind::Rect, attrs)
    }

    fn draw_line(&mut self, path: &PathSpec, style: &Style) -> Result<ShapeHandle> {
        let mut attrs = style.clone();
        attrs.entry("stroke".to_string()).or_insert_with(|| "black".into());
        attrs.insert("fill".into(), "none".into());
        self.push(ShapeKind::Line(path.clone()), attrs)
    }

    fn draw_text(&mut self, x: f64, y: f64, content: &str, style: &Style) -> Result<ShapeHandle> {
        let mut attrs = style.clone();
        attrs.insert("x".into(), x.into());
        attrs.insert("y".into(), y.into());
        self.push(ShapeKind::Text(content.to_string()), attrs)
    }

    fn bounding_box(&self, handle: ShapeHandle) -> Option<BoundingBox> {
        let shape = self.shapes.get(handle.0)?.as_ref()?;
        let a = &shape.attributes;
        Some(match &shape.kind {
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
        })
    }

    fn animate(&mut self, handle: ShapeHandle, delta: &Style, duration_ms: u64) -> Result<()> {
        validate_paint(delta)?;
        let shape = self.live_mut(handle)?;
        for (key, to) in delta {
            let from = shape.attributes.insert(key.clone(), to.clone());
            shape.animations.push(SvgAnimation { attribute: key.clone(), from, to: to.clone(), duration_ms });
        }
        Ok(())
    }

    fn set_attributes(&mut self, handle: ShapeHandle, delta: &Style) -> Result<()> {
        validate_paint(delta)?;
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

fn validate_paint(attrs: &Style) -> Result<()> {
    for key in PAINT_ATTRIBUTES {
        if let Some(value) = attrs.get(key) {
            let text = value.as_str().ok_or_else(|| Error::InvalidColor(value.to_string()))?;
            Rgba::parse(text)?;
        }
    }
    Ok(())
}

/// Serialize an attribute value; paint is normalized to CSS.
fn attribute_value(key: &str, value: &Value) -> String {
    match value {
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
        Value::String(s) if PAINT_ATTRIBUTES.contains(&key) && s != "none" => {
            Rgba::parse(s).map_or_else(|_| escape_xml(s), |c| c.to_css())
        }
        Value::String(s) => escape_xml(s),
        other => escape_xml(&other.to_string()),
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn shape_to_svg(shape: &SvgShape) -> String {
    let mut attrs = String::new();
    for (key, value) in &shape.attributes {
        let _ = write!(attrs, r#" {key}="{}""#, attribute_value(key, value));
    }

    let mut children = String::new();
    for anim in &shape.animations {
        let from = anim
            .from
            .as_ref()
            .map(|v| format!(r#" from="{}""#, attribute_value(&anim.attribute, v)))
            .unwrap_or_default();
        let _ = write!(
            children,
            r#"<animate attributeName="{}"{from} to="{}" dur="{}ms" fill="freeze"/>"#,
            anim.attribute,
            attribute_value(&anim.attribute, &anim.to),
            anim.duration_ms
        );
    }

    match &shape.kind {
        ShapeKind::Rect if children.is_empty() => format!("<rect{attrs}/>"),
        ShapeKind::Rect => format!("<rect{attrs}>{children}</rect>"),
        ShapeKind::Line(path) => format!(r#"<path d="{path}"{attrs}/>"#),
        ShapeKind::Text(content) => format!("<text{attrs}>{}{children}</text>", escape_xml(content)),
    }
}

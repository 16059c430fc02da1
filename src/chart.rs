//! A bar chart bound to one rendering surface.
//!
//! [`BarChart`] owns its surface, options, current scale and the handles of
//! everything it drew. Every draw/update computes the full geometry first
//! and only then touches the surface, so a scale or shape error leaves the
//! previous chart intact. When the surface itself rejects a shape, the stored
//! layout is brought in line with what the surface holds: a failed draw
//! clears the bars and labels, a failed update records only the bars that
//! actually moved.

use crate::axis::{axis_lines, plan_ticks, Tick};
use crate::config::ChartOptions;
use crate::data::{Series, Style};
use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, DrawSurface, Size};
use crate::layout::{label_anchors, label_baseline, layout, Layout};
use crate::scale::{compute_yscale, YScale};
use crate::spacing::resolve_spacing;
use crate::surface::{RenderSurface, ShapeHandle};
use crate::update::{apply_all, diff, BarDelta};
use serde_json::Value;

fn style<const N: usize>(pairs: [(&str, Value); N]) -> Style {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// Chart instance: `create` once, then `draw` and `update`.
#[derive(Debug)]
pub struct BarChart<S: RenderSurface> {
    surface: S,
    options: ChartOptions,
    canvas: Size,
    draw_surface: DrawSurface,
    yscale: Option<YScale>,
    layout: Layout,
    bars: Vec<ShapeHandle>,
    labels: Vec<ShapeHandle>,
    ticks: Vec<ShapeHandle>,
}

impl<S: RenderSurface> BarChart<S> {
    /// Bind a chart to `surface` and draw the axis lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface rejects the axis lines.
    pub fn create(mut surface: S, options: ChartOptions) -> Result<Self> {
        let canvas = surface.measure();
        let axis_style = style([("stroke-width", options.axis.width.into())]);
        for path in axis_lines(&options, canvas) {
            surface.draw_line(&path, &axis_style)?;
        }

        Ok(Self {
            draw_surface: DrawSurface::from_canvas(canvas, &options),
            surface,
            options,
            canvas,
            yscale: None,
            layout: Layout::default(),
            bars: Vec::new(),
            labels: Vec::new(),
            ticks: Vec::new(),
        })
    }

    /// Resolved options.
    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// The underlying surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Give back the surface.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Current y-scale, once drawn.
    #[must_use]
    pub fn yscale(&self) -> Option<&YScale> {
        self.yscale.as_ref()
    }

    /// Geometry of the bars and labels currently on the surface.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Current drawable rectangle.
    #[must_use]
    pub fn draw_surface(&self) -> &DrawSurface {
        &self.draw_surface
    }

    /// Draw `series`, replacing any bars and labels from a previous draw.
    ///
    /// Labels are drawn only when there is exactly one per top-level element.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DegenerateScale`] for an unmappable value
    /// range, leaving the previous chart in place, or any error raised by the
    /// surface, after which the chart holds no bars or labels.
    pub fn draw(&mut self, series: &Series, labels: &[String]) -> Result<&Layout> {
        self.canvas = self.surface.measure();
        self.draw_surface = DrawSurface::from_canvas(self.canvas, &self.options);
        let ds = self.draw_surface;

        let spacing = resolve_spacing(series, &self.options, &ds);
        let yscale = compute_yscale(series, &self.options, &ds, self.yscale.as_ref())?;
        let mut planned = layout(series, &yscale, &spacing, &self.options, &ds, self.canvas, labels);

        self.clear_bars();
        if let Err(err) = self.draw_shapes(series, &mut planned, labels) {
            tracing::warn!(error = %err, "surface rejected draw, chart cleared");
            self.clear_bars();
            return Err(err);
        }
        self.layout = planned;

        let ticks = self.redraw_ticks(&yscale);
        self.yscale = Some(yscale);
        ticks?;

        tracing::debug!(
            bars = self.layout.bars.len(),
            labels = self.layout.labels.len(),
            grouped = series.is_grouped(),
            "chart drawn"
        );
        Ok(&self.layout)
    }

    /// Move the existing bars to the values of `series`.
    ///
    /// With `animate` the surface transitions each bar over
    /// `animation.duration_ms`; otherwise attributes are set at once.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ShapeMismatch`] if `series` has a different
    /// bar count than the bars on the surface, [`crate::Error::DegenerateScale`]
    /// for an unmappable value range, or any error raised by the surface.
    pub fn update(&mut self, series: &Series, animate: bool) -> Result<Vec<BarDelta>> {
        let ds = self.draw_surface;
        let yscale = compute_yscale(series, &self.options, &ds, self.yscale.as_ref())?;
        let deltas = diff(series, &self.layout.bars, &yscale, &ds)?;
        if self.bars.len() != deltas.len() {
            return Err(Error::ShapeMismatch { context: "update", expected: self.bars.len(), actual: deltas.len() });
        }

        let duration = self.options.animation.duration_ms;
        for (moved, (handle, delta)) in self.bars.iter().zip(&deltas).enumerate() {
            let attrs = delta.to_attributes();
            let result = if animate {
                self.surface.animate(*handle, &attrs, duration)
            } else {
                self.surface.set_attributes(*handle, &attrs)
            };
            if let Err(err) = result {
                tracing::warn!(error = %err, moved, "surface rejected update");
                if moved > 0 {
                    for (bar, delta) in self.layout.bars.iter_mut().zip(&deltas).take(moved) {
                        *bar = delta.apply(bar);
                    }
                    // moved bars use the new scale; drop the tick so it is redrawn
                    for handle in self.ticks.drain(..) {
                        self.surface.remove(handle);
                    }
                    self.yscale = Some(yscale);
                }
                return Err(err);
            }
        }

        let ticks = self.redraw_ticks(&yscale);
        self.layout.bars = apply_all(&self.layout.bars, &deltas);
        self.yscale = Some(yscale);
        ticks?;

        tracing::debug!(bars = deltas.len(), animate, "chart updated");
        Ok(deltas)
    }

    /// Remove bars and labels from the surface and forget their geometry.
    fn clear_bars(&mut self) {
        for handle in self.bars.drain(..).chain(self.labels.drain(..)) {
            self.surface.remove(handle);
        }
        self.layout = Layout::default();
    }

    /// Draw the bars and labels of `planned`, chaining group members from
    /// the rendered right edge of their left neighbour.
    fn draw_shapes(&mut self, series: &Series, planned: &mut Layout, labels: &[String]) -> Result<()> {
        let per_group = series.per_group().unwrap_or(1).max(1);
        let mut elements = Vec::with_capacity(series.len());
        let mut element: Option<BoundingBox> = None;
        let mut prev_right: Option<f64> = None;
        for (i, bar) in planned.bars.iter_mut().enumerate() {
            if series.is_grouped() {
                if let Some(right) = prev_right {
                    bar.x = right;
                }
            }
            let handle = self.surface.draw_rect(bar.x, bar.y, bar.width, bar.height, &bar.style)?;
            self.bars.push(handle);

            let rendered = self.surface.bounding_box(handle).unwrap_or_else(|| bar.bounds());
            element = Some(element.map_or(rendered, |b| b.union(rendered)));
            prev_right = Some(rendered.x2);
            if (i + 1) % per_group == 0 {
                elements.extend(element.take());
                prev_right = None;
            }
        }
        if elements.len() < series.len() {
            // empty groups have no rendered bars; keep their planned bounds
            elements = planned.elements.clone();
        }
        planned.elements = elements;

        let opts = &self.options;
        planned.labels = label_anchors(&planned.elements, labels, label_baseline(opts, self.canvas));
        let label_style = style([
            ("font-family", opts.labels.font.clone().into()),
            ("font-size", opts.labels.font_size.into()),
            ("text-anchor", "middle".into()),
        ]);
        for anchor in &planned.labels {
            let handle = self.surface.draw_text(anchor.x, anchor.y, &anchor.text, &label_style)?;
            self.labels.push(handle);
        }
        Ok(())
    }

    fn redraw_ticks(&mut self, yscale: &YScale) -> Result<()> {
        let plan = plan_ticks(yscale, self.yscale.as_ref(), !self.ticks.is_empty(), &self.draw_surface);
        let Some(value) = plan.tick_value.filter(|_| plan.redraw) else {
            return Ok(());
        };

        for handle in self.ticks.drain(..) {
            self.surface.remove(handle);
        }
        let opts = &self.options;
        let tick = Tick::new(value, yscale, &self.draw_surface, opts);
        let mark = self.surface.draw_line(&tick.mark, &style([("stroke-width", 1.0_f64.into())]))?;
        let label = self.surface.draw_text(
            tick.label_x,
            tick.y,
            &tick.text(),
            &style([
                ("font-family", opts.labels.font.clone().into()),
                ("font-size", opts.labels.font_size.into()),
                ("text-anchor", "end".into()),
            ]),
        )?;
        self.ticks.extend([mark, label]);
        Ok(())
    }
}

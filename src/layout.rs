//! Bar geometry and label anchors.
//!
//! Flat series place one bar per pitch `spacing.bar + bar.width`, each bar
//! preceded by its gap. Grouped series place one group per pitch
//! `spacing.group + bar.width * per_group`; members of a group touch, each
//! starting at its left neighbour's right edge.

use crate::config::ChartOptions;
use crate::data::{DataPoint, Series, Style};
use crate::geometry::{BoundingBox, DrawSurface, Size};
use crate::scale::YScale;
use crate::spacing::Spacing;

/// Pixel rectangle of one bar plus its paint attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height above the baseline.
    pub height: f64,
    /// Paint attributes from the data point.
    pub style: Style,
}

impl BarGeometry {
    /// Bounding box of the rectangle.
    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_rect(self.x, self.y, self.width, self.height)
    }
}

/// Where a label for one top-level element is placed.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelAnchor {
    /// Horizontal midpoint of the element.
    pub x: f64,
    /// Baseline of the label row.
    pub y: f64,
    /// Label text.
    pub text: String,
}

/// Result of laying out a series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    /// Bars, left to right, groups flattened.
    pub bars: Vec<BarGeometry>,
    /// Combined bounds of each top-level element (bar or group).
    pub elements: Vec<BoundingBox>,
    /// Label anchors; empty unless one label per element was supplied.
    pub labels: Vec<LabelAnchor>,
}

/// Vertical extent `(y, height)` of a bar with `value` standing on the baseline.
#[must_use]
pub fn bar_extent(value: f64, yscale: &YScale, surface: &DrawSurface) -> (f64, f64) {
    let height = yscale.height_of(value);
    (surface.bottom - height, height)
}

/// Y of the label row: below the x axis, offset by half the font size.
#[must_use]
pub fn label_baseline(opts: &ChartOptions, canvas: Size) -> f64 {
    canvas.height - opts.graph.bottom_gutter + opts.axis.width + (opts.labels.font_size / 2.0).floor()
}

/// One anchor per element at its horizontal midpoint.
///
/// Returns nothing when `labels` and `elements` differ in length.
#[must_use]
pub fn label_anchors(elements: &[BoundingBox], labels: &[String], y: f64) -> Vec<LabelAnchor> {
    if labels.len() != elements.len() {
        if !labels.is_empty() {
            tracing::warn!(labels = labels.len(), elements = elements.len(), "label count mismatch, labels skipped");
        }
        return Vec::new();
    }
    elements
        .iter()
        .zip(labels)
        .map(|(bounds, text)| LabelAnchor { x: bounds.center_x(), y, text: text.clone() })
        .collect()
}

fn bar_at(x: f64, point: &DataPoint, width: f64, yscale: &YScale, surface: &DrawSurface) -> BarGeometry {
    let (y, height) = bar_extent(point.value, yscale, surface);
    tracing::trace!(x, y, width, height, "bar");
    BarGeometry { x, y, width, height, style: point.style.clone() }
}

/// Lay out every bar of `series` and the anchors for `labels`.
#[must_use]
pub fn layout(
    series: &Series,
    yscale: &YScale,
    spacing: &Spacing,
    opts: &ChartOptions,
    surface: &DrawSurface,
    canvas: Size,
    labels: &[String],
) -> Layout {
    let bar_width = opts.bar.width;
    let mut bars = Vec::with_capacity(series.bar_count());
    let mut elements = Vec::with_capacity(series.len());

    match series {
        Series::Flat(points) => {
            let pitch = spacing.bar + bar_width;
            for (i, point) in points.iter().enumerate() {
                let x = surface.left + pitch * i as f64 + spacing.bar;
                let bar = bar_at(x, point, bar_width, yscale, surface);
                elements.push(bar.bounds());
                bars.push(bar);
            }
        }
        Series::Grouped(groups) => {
            let per_group = series.per_group().unwrap_or(0);
            let pitch = spacing.group + bar_width * per_group as f64;
            for (i, group) in groups.iter().enumerate() {
                let origin = surface.left + pitch * i as f64 + spacing.group;
                let mut bounds: Option<BoundingBox> = None;
                let mut x = origin;
                for point in group {
                    let bar = bar_at(x, point, bar_width, yscale, surface);
                    x = bar.bounds().x2;
                    bounds = Some(bounds.map_or(bar.bounds(), |b| b.union(bar.bounds())));
                    bars.push(bar);
                }
                elements.push(
                    bounds.unwrap_or(BoundingBox::new(origin, surface.bottom, origin, surface.bottom)),
                );
            }
        }
    }

    let labels = label_anchors(&elements, labels, label_baseline(opts, canvas));
    Layout { bars, elements, labels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::compute_yscale;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn setup(top_gutter: f64) -> (ChartOptions, DrawSurface, Size) {
        let mut opts = ChartOptions::default();
        opts.yscale.top_gutter = top_gutter;
        (opts, DrawSurface::new(22.0, 20.0, 380.0, 260.0), Size::new(400.0, 282.0))
    }

    fn labels(texts: &[&str]) -> Vec<String> {
        texts.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_flat_geometry() {
        let (opts, ds, canvas) = setup(50.0);
        let series = Series::flat(&[10.0, 20.0, 5.0]);
        let y = compute_yscale(&series, &opts, &ds, None).unwrap();
        let out = layout(&series, &y, &Spacing::from_options(&opts), &opts, &ds, canvas, &[]);

        assert_eq!(out.bars.len(), 3);
        assert_relative_eq!(out.bars[0].height, 34.285_714, epsilon = 1e-5);
        assert_relative_eq!(out.bars[0].y, 225.714_286, epsilon = 1e-5);
        // pitch 25, leading gap 5
        let xs: Vec<f64> = out.bars.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![27.0, 52.0, 77.0]);
        assert!(out.bars.iter().all(|b| b.width == 20.0));
        assert!(out.labels.is_empty());
    }

    #[test]
    fn test_bar_bottoms_on_baseline() {
        let (opts, ds, canvas) = setup(10.0);
        let series = Series::flat(&[3.0, 0.0, 8.0]);
        let y = compute_yscale(&series, &opts, &ds, None).unwrap();
        let out = layout(&series, &y, &Spacing::from_options(&opts), &opts, &ds, canvas, &[]);
        for bar in &out.bars {
            assert_relative_eq!(bar.y + bar.height, ds.bottom);
        }
    }

    #[test]
    fn test_grouped_members_touch() {
        let (opts, ds, canvas) = setup(10.0);
        let series = Series::grouped(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let y = compute_yscale(&series, &opts, &ds, None).unwrap();
        let out = layout(&series, &y, &Spacing::from_options(&opts), &opts, &ds, canvas, &[]);

        let xs: Vec<f64> = out.bars.iter().map(|b| b.x).collect();
        // group pitch 10 + 3*20 = 70, leading gap 10
        assert_eq!(xs, vec![32.0, 52.0, 72.0, 102.0, 122.0, 142.0]);
        assert_eq!(out.elements.len(), 2);
        assert_eq!(out.elements[0].x, 32.0);
        assert_eq!(out.elements[0].x2, 92.0);
    }

    #[test]
    fn test_labels_at_midpoints() {
        let (opts, ds, canvas) = setup(10.0);
        let series = Series::flat(&[5.0, 10.0, 15.0]);
        let y = compute_yscale(&series, &opts, &ds, None).unwrap();
        let spacing = Spacing::from_options(&opts);

        let out = layout(&series, &y, &spacing, &opts, &ds, canvas, &labels(&["a", "b", "c"]));
        assert_eq!(out.labels.len(), 3);
        for (bar, label) in out.bars.iter().zip(&out.labels) {
            assert_eq!(label.x, bar.x + bar.width / 2.0);
        }
        // 282 - 20 + 2 + floor(12 / 2)
        assert_eq!(out.labels[0].y, 270.0);
        assert_eq!(out.labels[2].text, "c");

        let out = layout(&series, &y, &spacing, &opts, &ds, canvas, &labels(&["a", "b"]));
        assert!(out.labels.is_empty());
    }

    #[test]
    fn test_group_label_centered_on_group() {
        let (opts, ds, canvas) = setup(10.0);
        let series = Series::grouped(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let y = compute_yscale(&series, &opts, &ds, None).unwrap();
        let out =
            layout(&series, &y, &Spacing::from_options(&opts), &opts, &ds, canvas, &labels(&["x", "y"]));
        // first group spans 32..72
        assert_eq!(out.labels[0].x, 52.0);
        // second group spans 82..122
        assert_eq!(out.labels[1].x, 102.0);
    }

    #[test]
    fn test_style_carried_verbatim() {
        let (opts, ds, canvas) = setup(10.0);
        let series = Series::Flat(vec![DataPoint::new(4.0).with_style("fill", "#f00")]);
        let y = compute_yscale(&series, &opts, &ds, None).unwrap();
        let out = layout(&series, &y, &Spacing::from_options(&opts), &opts, &ds, canvas, &[]);
        assert_eq!(out.bars[0].style["fill"], json!("#f00"));
    }

    #[test]
    fn test_negative_spacing_overlaps() {
        let (opts, ds, canvas) = setup(10.0);
        let series = Series::flat(&[1.0, 1.0]);
        let y = compute_yscale(&series, &opts, &ds, None).unwrap();
        let spacing = Spacing { bar: -30.0, group: 0.0 };
        let out = layout(&series, &y, &spacing, &opts, &ds, canvas, &[]);
        assert!(out.bars[1].x < out.bars[0].x + out.bars[0].width);
    }
}

#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for bar layout and chart drawing.

use bar_viz::chart::BarChart;
use bar_viz::config::ChartOptions;
use bar_viz::data::Series;
use bar_viz::geometry::{DrawSurface, Size};
use bar_viz::layout::layout;
use bar_viz::output::SvgSurface;
use bar_viz::scale::compute_yscale;
use bar_viz::spacing::resolve_spacing;
use bar_viz::surface::RecordingSurface;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn values(n: usize) -> Vec<f64> {
    (0..n).map(|i| ((i * 37) % 101) as f64).collect()
}

fn layout_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let canvas = Size::new(1920.0, 1080.0);
    let opts = ChartOptions::default().with_auto_size(true);
    let surface = DrawSurface::from_canvas(canvas, &opts);

    for n in [10, 100, 1000] {
        let series = Series::flat(&values(n));
        group.bench_with_input(BenchmarkId::new("flat", n), &series, |b, series| {
            b.iter(|| {
                let yscale = compute_yscale(series, &opts, &surface, None).expect("scale should fit");
                let spacing = resolve_spacing(series, &opts, &surface);
                layout(black_box(series), &yscale, &spacing, &opts, &surface, canvas, &[])
            });
        });

        let groups: Vec<Vec<f64>> = values(n * 3).chunks(3).map(<[f64]>::to_vec).collect();
        let series = Series::grouped(&groups).expect("groups are uniform");
        group.bench_with_input(BenchmarkId::new("grouped", n), &series, |b, series| {
            b.iter(|| {
                let yscale = compute_yscale(series, &opts, &surface, None).expect("scale should fit");
                let spacing = resolve_spacing(series, &opts, &surface);
                layout(black_box(series), &yscale, &spacing, &opts, &surface, canvas, &[])
            });
        });
    }

    group.finish();
}

fn chart_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart");

    for n in [10, 100] {
        let first = Series::flat(&values(n));
        let second = Series::flat(&values(n).iter().map(|v| v * 1.5).collect::<Vec<_>>());

        group.bench_with_input(BenchmarkId::new("draw_update_recording", n), &n, |b, _| {
            b.iter(|| {
                let mut chart = BarChart::create(RecordingSurface::new(1920.0, 1080.0), ChartOptions::default())
                    .expect("chart creation should succeed");
                chart.draw(black_box(&first), &[]).expect("draw should succeed");
                chart.update(black_box(&second), true).expect("update should succeed")
            });
        });

        group.bench_with_input(BenchmarkId::new("draw_render_svg", n), &n, |b, _| {
            b.iter(|| {
                let mut chart = BarChart::create(SvgSurface::new(1920.0, 1080.0), ChartOptions::default())
                    .expect("chart creation should succeed");
                chart.draw(black_box(&first), &[]).expect("draw should succeed");
                chart.surface().render()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, layout_benchmark, chart_benchmark);
criterion_main!(benches);

//! Benchmarks for filled contour rendering.
//!
//! Run with: cargo bench --package renderer --bench contour_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use projection::LambertConformal;
use rand::Rng;
use renderer::contour::{band_colors, render_filled_contours, symmetric_levels, TriangulatedField};
use renderer::{CenteredNorm, ColorScale, Colormap, MapCanvas};
use test_utils::{eics_rows, lattice, sample_lattice, EICS_JY_PEAK};

fn jy_samples(points: &[(f64, f64)]) -> Vec<(f64, f64, f64)> {
    eics_rows(points)
        .into_iter()
        .map(|[lat, lon, _, jy]| (lat, lon, jy))
        .collect()
}

/// Smooth field with random noise on top.
fn noisy_samples(points: &[(f64, f64)]) -> Vec<(f64, f64, f64)> {
    let mut rng = rand::thread_rng();
    jy_samples(points)
        .into_iter()
        .map(|(lat, lon, v)| (lat, lon, v + rng.gen_range(-20.0..20.0)))
        .collect()
}

// =============================================================================
// TRIANGULATION BENCHMARKS
// =============================================================================

fn bench_triangulate_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulate_samples");

    for step in [5.0, 2.0, 1.0] {
        let samples = jy_samples(&lattice(40.0, 80.0, -150.0, -50.0, step));
        group.throughput(Throughput::Elements(samples.len() as u64));
        group.bench_with_input(BenchmarkId::new("step", step), &samples, |b, samples| {
            b.iter(|| TriangulatedField::from_samples(black_box(samples)));
        });
    }

    group.finish();
}

fn bench_field_sample(c: &mut Criterion) {
    let field = TriangulatedField::from_samples(&noisy_samples(&sample_lattice())).unwrap();

    c.bench_function("field_sample_linear", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..1000 {
                let lat = 40.0 + (i % 40) as f64;
                let lon = -150.0 + (i % 100) as f64;
                acc += field.sample(black_box(lat), black_box(lon));
            }
            acc
        });
    });
}

// =============================================================================
// RENDER BENCHMARKS
// =============================================================================

fn bench_render_filled_contours(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_filled_contours");
    group.sample_size(20);

    let field = TriangulatedField::from_samples(&jy_samples(&sample_lattice())).unwrap();
    let levels = symmetric_levels(EICS_JY_PEAK, 100);
    let mut norm = CenteredNorm::default();
    let colors = band_colors(&levels, &mut norm, ColorScale::continuous(Colormap::JetR)).unwrap();

    for figure_px in [400u32, 800, 1200] {
        group.throughput(Throughput::Elements(figure_px as u64 * figure_px as u64));
        group.bench_with_input(BenchmarkId::new("figure_px", figure_px), &figure_px, |b, &px| {
            b.iter(|| {
                let mut canvas = MapCanvas::new(LambertConformal::north_america(), px).unwrap();
                render_filled_contours(&mut canvas, &field, black_box(&levels), &colors).unwrap();
                canvas
            });
        });
    }

    group.finish();
}

fn bench_level_count_impact(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_count_impact");
    group.sample_size(20);

    let field = TriangulatedField::from_samples(&jy_samples(&sample_lattice())).unwrap();

    for count in [5usize, 20, 100] {
        let levels = symmetric_levels(EICS_JY_PEAK, count);
        let mut norm = CenteredNorm::default();
        let colors = band_colors(&levels, &mut norm, ColorScale::discrete(Colormap::Seismic, 20)).unwrap();

        group.bench_with_input(BenchmarkId::new("levels", count), &levels, |b, levels| {
            b.iter(|| {
                let mut canvas = MapCanvas::new(LambertConformal::north_america(), 600).unwrap();
                render_filled_contours(&mut canvas, &field, black_box(levels), &colors).unwrap();
                canvas
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_triangulate_samples,
    bench_field_sample,
    bench_render_filled_contours,
    bench_level_count_impact,
);
criterion_main!(benches);

//! Baseline pipeline benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Scalability of the full pipeline (1K to 20K rows)
//! - Ridge cross-validation cost against grid size and feature count
//! - Rolling-median residual smoothing against window size
//! - Diagnostic panel construction and SVG rendering
//!
//! Run with `cargo bench -p baseline-bench`.

use baseline::internals::algorithms::ridge::RidgeCV;
use baseline::internals::math::stats::{logspace, rolling_median};
use baseline::internals::plot::Histogram;
use baseline::prelude::*;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::prelude::*;
use rand_distr::{Normal, Uniform};
use std::hint::black_box;

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Generate `n_features` uniform columns and a linear target with Gaussian noise.
fn generate_design(size: usize, n_features: usize, seed: u64) -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let feature_dist = Uniform::new(0.0, 100.0).unwrap();
    let noise_dist = Normal::new(0.0, 1.0).unwrap();

    let columns: Vec<Vec<f64>> = (0..n_features)
        .map(|_| (0..size).map(|_| feature_dist.sample(&mut rng)).collect())
        .collect();
    let y = (0..size)
        .map(|i| {
            let signal: f64 = columns
                .iter()
                .enumerate()
                .map(|(j, col)| col[i] / (j + 1) as f64)
                .sum();
            10.0 + signal + noise_dist.sample(&mut rng)
        })
        .collect();
    (columns, y)
}

/// Generate an engine log frame with dropped readings.
fn generate_engine_frame(size: usize, seed: u64) -> Frame {
    let (columns, mut y) = generate_design(size, 3, seed);
    for i in (0..size).step_by(37) {
        y[i] = f64::NAN;
    }

    let mut frame = Frame::new().with_column("Fuel Rate", y).unwrap();
    for (label, values) in ["Shaft Power", "Sea Temp", "Draft"].into_iter().zip(columns) {
        frame.push_column(label, values).unwrap();
    }
    frame
}

/// Generate a residual-like series with occasional spikes.
fn generate_residuals(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_dist = Normal::new(0.0, 0.5).unwrap();

    (0..size)
        .map(|i| {
            let spike = if i % 97 == 0 { 5.0 } else { 0.0 };
            noise_dist.sample(&mut rng) + spike
        })
        .collect()
}

fn fitted_pipeline(size: usize) -> BaselinePipeline {
    let train = generate_engine_frame(size, 42);
    let test = generate_engine_frame(size / 4, 43);
    let mut pipeline = Baseline::new()
        .unit("Bench")
        .equipment("ME1")
        .target("Fuel Rate")
        .features(["Shaft Power", "Sea Temp", "Draft"])
        .build()
        .unwrap();
    pipeline.fit(&train, &test).unwrap();
    pipeline
}

// ============================================================================
// Benchmark Functions
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalability");
    group.sample_size(30);

    for size in [1_000, 5_000, 20_000] {
        group.throughput(Throughput::Elements(size as u64));

        let train = generate_engine_frame(size, 42);
        let test = generate_engine_frame(size / 4, 43);

        group.bench_with_input(BenchmarkId::new("pipeline", size), &size, |b, _| {
            b.iter(|| {
                let mut pipeline = Baseline::new()
                    .equipment("ME1")
                    .target("Fuel Rate")
                    .features(["Shaft Power", "Sea Temp", "Draft"])
                    .filter_residuals(10)
                    .build()
                    .unwrap();
                pipeline.fit(black_box(&train), black_box(&test)).unwrap();
                pipeline
            })
        });
    }
    group.finish();
}

fn bench_alpha_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("alpha_grid");
    group.sample_size(50);

    let (x, y) = generate_design(5_000, 3, 42);

    for num in [5, 20, 50, 200] {
        let cv = RidgeCV::new(logspace(-3.0, 3.0, num));
        group.bench_with_input(BenchmarkId::new("ridge_cv", num), &num, |b, _| {
            b.iter(|| cv.fit(black_box(&x), black_box(&y)).unwrap())
        });
    }
    group.finish();
}

fn bench_features(c: &mut Criterion) {
    let mut group = c.benchmark_group("features");
    group.sample_size(50);

    for n_features in [1, 4, 16, 32] {
        let (x, y) = generate_design(5_000, n_features, 42);
        let cv = RidgeCV::default();
        group.bench_with_input(
            BenchmarkId::new("ridge_cv", n_features),
            &n_features,
            |b, _| b.iter(|| cv.fit(black_box(&x), black_box(&y)).unwrap()),
        );
    }
    group.finish();
}

fn bench_rolling_median(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_median");
    group.sample_size(50);

    let residuals = generate_residuals(20_000, 42);
    group.throughput(Throughput::Elements(residuals.len() as u64));

    for window in [5, 10, 50, 200] {
        group.bench_with_input(BenchmarkId::new("window", window), &window, |b, &w| {
            b.iter(|| rolling_median(black_box(&residuals), w))
        });
    }
    group.finish();
}

fn bench_plot(c: &mut Criterion) {
    let mut group = c.benchmark_group("plot");
    group.sample_size(20);

    let residuals = generate_residuals(20_000, 42);
    group.bench_function("histogram", |b| {
        b.iter(|| Histogram::new(black_box(&residuals)))
    });

    let pipeline = fitted_pipeline(4_000);
    group.bench_function("panels", |b| {
        b.iter(|| pipeline.plot().unwrap().panels())
    });
    group.bench_function("render_svg_string", |b| {
        b.iter(|| {
            pipeline
                .plot()
                .unwrap()
                .render_svg_string(pipeline.config().figure_size)
                .unwrap()
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_scalability,
    bench_alpha_grid,
    bench_features,
    bench_rolling_median,
    bench_plot,
);
criterion_main!(benches);

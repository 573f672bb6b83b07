//! Equipment Baseline Examples
//!
//! This example demonstrates:
//! - Building a baseline with the fluent builder
//! - Driving the pipeline stages one at a time
//! - Residual smoothing and alarm classification
//! - Loading a configuration from JSON
//! - Rendering the 2×4 diagnostic figure to SVG
//!
//! Set `RUST_LOG=baseline=debug` to see per-stage timings.

use baseline::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), BaselineError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("baseline=info")),
        )
        .init();

    println!("{}", "=".repeat(80));
    println!("Equipment Baseline Examples");
    println!("{}", "=".repeat(80));
    println!();

    example_1_full_pipeline()?;
    example_2_staged_pipeline()?;
    example_3_json_config()?;

    Ok(())
}

/// Synthetic main-engine log: fuel rate driven by shaft power, sea
/// temperature and draft, with gaps and sensor noise.
fn engine_log(n: usize, seed: u64) -> Result<Frame, BaselineError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.5).map_err(|e| BaselineError::Config(e.to_string()))?;

    let mut power = Vec::with_capacity(n);
    let mut temp = Vec::with_capacity(n);
    let mut draft = Vec::with_capacity(n);
    let mut fuel = Vec::with_capacity(n);
    for i in 0..n {
        let p = rng.random_range(4_000.0..12_000.0);
        let t = 12.0 + 8.0 * (i as f64 / 50.0).sin();
        let d = rng.random_range(8.0..11.0);
        let f = 0.021 * p + 0.35 * t - 1.2 * d + 40.0 + noise.sample(&mut rng);

        power.push(p);
        temp.push(t);
        draft.push(d);
        // Every 37th reading has a dropped fuel-flow sample.
        fuel.push(if i % 37 == 0 { f64::NAN } else { f });
    }

    Frame::new()
        .with_column("Fuel Rate", fuel)?
        .with_column("Shaft Power", power)?
        .with_column("Sea Temp", temp)?
        .with_column("Draft", draft)
}

/// Example 1: Full Pipeline
/// Fits with the defaults and writes the diagnostic figure
fn example_1_full_pipeline() -> Result<(), BaselineError> {
    println!("Example 1: Full Pipeline");
    println!("{}", "-".repeat(80));

    let train = engine_log(600, 7)?;
    let test = engine_log(200, 8)?;

    let mut pipeline = Baseline::new()
        .unit("Aurora")
        .equipment("ME1")
        .target("Fuel Rate")
        .features(["Shaft Power", "Sea Temp", "Draft"])
        .build()?;

    let elapsed = pipeline.fit(&train, &test)?;
    let model = pipeline.model();

    println!("Completed in {elapsed:?}");
    if let Some(fit) = model.ridge_fit() {
        println!("Selected alpha: {:.4e}", fit.alpha);
    }
    println!("Equation:           {}", model.equation().unwrap_or_default());
    println!("Corrected equation: {}", model.corrected_equation().unwrap_or_default());
    if let Some(metrics) = model.metrics() {
        println!("{metrics}");
    }

    let path = std::env::temp_dir().join("baseline_me1.svg");
    pipeline.render_svg(&path)?;
    println!("Figure written to {}", path.display());

    println!();
    Ok(())
}

/// Example 2: Staged Pipeline
/// Runs each stage explicitly and classifies the smoothed residuals
fn example_2_staged_pipeline() -> Result<(), BaselineError> {
    println!("Example 2: Staged Pipeline");
    println!("{}", "-".repeat(80));

    let train = engine_log(400, 11)?;
    let test = engine_log(150, 12)?;

    let key = ModelKey::new(
        "Aurora",
        "ME1",
        "Fuel Rate",
        vec!["Shaft Power".to_string(), "Sea Temp".to_string()],
    )?;
    let mut model = RegressionModel::new(key, RidgeCV::default());

    model.split(&train, &test)?;
    model.fit()?;
    model.predict()?;
    model.correct()?;
    model.build_equation(4)?;
    model.compute_metrics(4, 2.0, 3.0)?;
    model.filter_residuals(true, 10)?;

    for timing in model.timings() {
        println!("  {:<9} {:?}", timing.stage.name(), timing.elapsed);
    }

    if let (Some(metrics), Some(resids)) = (model.metrics(), model.y_resids()) {
        let mut counts = [0usize; 3];
        for &r in resids {
            match metrics.classify(r) {
                Band::Normal => counts[0] += 1,
                Band::Warning => counts[1] += 1,
                Band::Alarm => counts[2] += 1,
            }
        }
        println!(
            "Smoothed residuals: {} normal, {} warning, {} alarm",
            counts[0], counts[1], counts[2]
        );
    }

    println!();
    Ok(())
}

/// Example 3: JSON Configuration
/// Tunes the run from a configuration document
fn example_3_json_config() -> Result<(), BaselineError> {
    println!("Example 3: JSON Configuration");
    println!("{}", "-".repeat(80));

    let config = BaselineConfig::from_json_str(
        r#"{
            "alphas": { "start": -2.0, "stop": 2.0, "num": 25 },
            "round_digits": 3,
            "warn_multiplier": 1.5,
            "alarm_multiplier": 2.5,
            "filter_residuals": true,
            "median_window": 5
        }"#,
    )?;

    let mut pipeline = Baseline::new()
        .equipment("ME2")
        .target("Fuel Rate")
        .features(["Shaft Power"])
        .config(config)
        .build()?;

    pipeline.fit(&engine_log(300, 21)?, &engine_log(100, 22)?)?;

    let plot = pipeline.plot()?;
    println!("Title: {}", plot.title());
    for panel in plot.panels() {
        println!("  {}", panel.title);
    }

    println!();
    Ok(())
}

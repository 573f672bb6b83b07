//! Tests for the staged regression pipeline.
//!
//! These tests verify the model that carries a baseline from frames to
//! scored residuals:
//! - Complete-case splitting of train and test frames
//! - Recovery of a known linear relationship end to end
//! - The corrected target and equation strings
//! - Warning/alarm limits and residual smoothing
//! - Stage ordering and timing
//!
//! ## Test Organization
//!
//! 1. **Split** - Column selection, missing data, empty splits
//! 2. **End to End** - Known coefficients, metrics, equations
//! 3. **Correction** - Secondary-feature removal
//! 4. **Residual Filtering** - Rolling median and zeroed lead-in
//! 5. **Stage Ordering** - Prerequisites, timings, resets

use approx::assert_relative_eq;
use baseline::prelude::*;

/// `Fuel Rate = 3 + 2·Shaft Power - 0.5·Sea Temp`, exactly.
fn engine_frame(n: usize, offset: usize) -> Frame {
    let power: Vec<f64> = (0..n).map(|i| 50.0 + (i + offset) as f64).collect();
    let temp: Vec<f64> = (0..n).map(|i| 10.0 + (((i + offset) * 7) % 11) as f64).collect();
    let fuel: Vec<f64> = power
        .iter()
        .zip(&temp)
        .map(|(p, t)| 3.0 + 2.0 * p - 0.5 * t)
        .collect();

    Frame::from_columns([
        ("Fuel Rate", fuel),
        ("Shaft Power", power),
        ("Sea Temp", temp),
    ])
    .expect("engine frame should build")
}

fn key(features: &[&str]) -> ModelKey {
    ModelKey::new(
        "Aurora",
        "ME1",
        "Fuel Rate",
        features.iter().map(|f| f.to_string()).collect(),
    )
    .expect("valid key")
}

fn exact_model(features: &[&str]) -> RegressionModel {
    RegressionModel::new(key(features), RidgeCV::new(vec![1e-10]))
}

// ============================================================================
// Split Tests
// ============================================================================

/// Test that incomplete rows are dropped from each split independently.
#[test]
fn test_split_drops_incomplete_rows() {
    let mut train = engine_frame(20, 0);
    train
        .push_column("Unused", vec![f64::NAN; 20])
        .expect("column");

    let mut fuel = engine_frame(10, 100).column("Fuel Rate").expect("fuel").to_vec();
    fuel[3] = f64::NAN;
    let test = Frame::from_columns([
        ("Fuel Rate", fuel),
        (
            "Shaft Power",
            engine_frame(10, 100).column("Shaft Power").expect("power").to_vec(),
        ),
        (
            "Sea Temp",
            engine_frame(10, 100).column("Sea Temp").expect("temp").to_vec(),
        ),
    ])
    .expect("test frame");

    let mut model = exact_model(&["Shaft Power", "Sea Temp"]);
    model.split(&train, &test).expect("split should succeed");

    let data = model.data().expect("split stored");
    // Unselected NaN column does not drop training rows.
    assert_eq!(data.y_train.len(), 20);
    assert_eq!(data.y_test.len(), 9);
    assert_eq!(data.x_test.len(), 2);
    assert_eq!(data.x_test[0].len(), 9);
}

/// Test a missing column.
#[test]
fn test_split_missing_column() {
    let mut model = exact_model(&["Shaft Power", "Draft"]);
    let frame = engine_frame(10, 0);

    assert_eq!(
        model.split(&frame, &frame).unwrap_err(),
        BaselineError::MissingColumn("Draft".to_string())
    );
}

/// Test a split left empty after dropping incomplete rows.
#[test]
fn test_split_empty_after_filtering() {
    let train = engine_frame(10, 0);
    let test = Frame::from_columns([
        ("Fuel Rate", vec![f64::NAN, f64::NAN]),
        ("Shaft Power", vec![1.0, 2.0]),
        ("Sea Temp", vec![1.0, 2.0]),
    ])
    .expect("test frame");

    let mut model = exact_model(&["Shaft Power", "Sea Temp"]);
    assert_eq!(
        model.split(&train, &test).unwrap_err(),
        BaselineError::EmptyInput { split: "test" }
    );
}

// ============================================================================
// End to End Tests
// ============================================================================

/// Test the full pipeline on noiseless data.
///
/// Verifies:
/// - Coefficients and intercept match the generating model
/// - Residuals vanish and R² rounds to 1
/// - Equation strings use sanitized symbols and feature order
#[test]
fn test_run_recovers_known_model() {
    let train = engine_frame(40, 0);
    let test = engine_frame(15, 40);

    let mut model = exact_model(&["Shaft Power", "Sea Temp"]);
    model
        .run(&train, &test, &BaselineConfig::default())
        .expect("run should succeed");

    let fit = model.ridge_fit().expect("fitted");
    assert_relative_eq!(fit.coefficients[0], 2.0, epsilon = 1e-6);
    assert_relative_eq!(fit.coefficients[1], -0.5, epsilon = 1e-6);
    assert_relative_eq!(fit.intercept, 3.0, epsilon = 1e-4);

    for &r in model.y_resids().expect("residuals") {
        assert_relative_eq!(r, 0.0, epsilon = 1e-6);
    }

    let metrics = model.metrics().expect("metrics");
    assert_relative_eq!(metrics.r_squared, 1.0);
    assert_relative_eq!(metrics.explained_variance, 1.0);
    assert_relative_eq!(metrics.mean_abs_error, 0.0);

    assert_eq!(
        model.equation(),
        Some("Value=2.000*ShaftPower - 0.5000*SeaTemp + 3.000")
    );
    assert_eq!(
        model.corrected_equation(),
        Some("Value=FuelRate + 0.5000*SeaTemp")
    );
}

/// Test the default penalty grid on noiseless data.
///
/// Verifies coefficients within 1% and R² of essentially 1.
#[test]
fn test_run_default_grid() {
    let train = engine_frame(60, 0);
    let test = engine_frame(20, 60);

    let mut model = RegressionModel::new(key(&["Shaft Power", "Sea Temp"]), RidgeCV::default());
    model
        .run(&train, &test, &BaselineConfig::default())
        .expect("run should succeed");

    let fit = model.ridge_fit().expect("fitted");
    assert_relative_eq!(fit.coefficients[0], 2.0, max_relative = 1e-2);
    assert_relative_eq!(fit.coefficients[1], -0.5, max_relative = 1e-2);
    assert!(model.metrics().expect("metrics").r_squared > 0.999);
}

/// Test that limits scale with their multipliers.
#[test]
fn test_limits_scale_with_multiplier() {
    let train = engine_frame(40, 0);
    let mut fuel = engine_frame(20, 40).column("Fuel Rate").expect("fuel").to_vec();
    for (i, v) in fuel.iter_mut().enumerate() {
        *v += if i % 2 == 0 { 0.3 } else { -0.2 };
    }
    let source = engine_frame(20, 40);
    let test = Frame::from_columns([
        ("Fuel Rate", fuel),
        ("Shaft Power", source.column("Shaft Power").expect("power").to_vec()),
        ("Sea Temp", source.column("Sea Temp").expect("temp").to_vec()),
    ])
    .expect("test frame");

    let mut model = exact_model(&["Shaft Power", "Sea Temp"]);
    model.split(&train, &test).expect("split");
    model.fit().expect("fit");
    model.predict().expect("predict");
    model.compute_metrics(10, 1.0, 2.0).expect("metrics");

    let metrics = model.metrics().expect("metrics");
    let resid_sd = std_dev(model.y_resids().expect("residuals"), 1);
    assert!(metrics.warning_limit > 0.0);
    assert_relative_eq!(metrics.warning_limit, resid_sd, epsilon = 1e-9);
    assert_relative_eq!(metrics.alarm_limit, 2.0 * metrics.warning_limit, epsilon = 1e-9);
}

// ============================================================================
// Correction Tests
// ============================================================================

/// Test that the corrected target equals the target without secondary features.
#[test]
fn test_correct_primary_only_is_identity() {
    let train = engine_frame(30, 0);
    let test = engine_frame(12, 30);

    let mut model = RegressionModel::new(key(&["Shaft Power"]), RidgeCV::default());
    model.split(&train, &test).expect("split");
    model.fit().expect("fit");
    model.correct().expect("correct");

    assert_eq!(model.y_corrected(), model.y_test());

    model.build_equation(4).expect("equation");
    assert_eq!(model.corrected_equation(), Some("Value=FuelRate"));
}

/// Test that correction removes exactly the secondary contribution.
#[test]
fn test_correct_removes_secondary_terms() {
    let train = engine_frame(30, 0);
    let test = engine_frame(12, 30);

    let mut model = exact_model(&["Shaft Power", "Sea Temp"]);
    model.split(&train, &test).expect("split");
    model.fit().expect("fit");
    model.correct().expect("correct");

    let coef = model.ridge_fit().expect("fitted").coefficients[1];
    let data = model.data().expect("split");
    let corrected = model.y_corrected().expect("corrected");
    for ((c, y), t) in corrected.iter().zip(&data.y_test).zip(&data.x_test[1]) {
        assert_relative_eq!(*c, y - coef * t, epsilon = 1e-12);
    }
    // Only power and the constant remain.
    for (c, p) in corrected.iter().zip(&data.x_test[0]) {
        assert_relative_eq!(*c, 3.0 + 2.0 * p, epsilon = 1e-4);
    }
}

// ============================================================================
// Residual Filtering Tests
// ============================================================================

/// Test rolling-median residual smoothing.
///
/// Verifies:
/// - The first `window + 1` entries are zero
/// - Later entries equal the trailing rolling median of the raw residuals
#[test]
fn test_filter_residuals_rolling_median() {
    let train = engine_frame(40, 0);
    let source = engine_frame(25, 40);
    let fuel: Vec<f64> = source
        .column("Fuel Rate")
        .expect("fuel")
        .iter()
        .enumerate()
        .map(|(i, v)| v + ((i * 13) % 7) as f64 * 0.1)
        .collect();
    let test = Frame::from_columns([
        ("Fuel Rate", fuel),
        ("Shaft Power", source.column("Shaft Power").expect("power").to_vec()),
        ("Sea Temp", source.column("Sea Temp").expect("temp").to_vec()),
    ])
    .expect("test frame");

    let mut model = exact_model(&["Shaft Power", "Sea Temp"]);
    model.split(&train, &test).expect("split");
    model.fit().expect("fit");
    model.predict().expect("predict");
    let raw = model.y_resids().expect("residuals").to_vec();

    let window = 4;
    model.filter_residuals(true, window).expect("filter");
    let filtered = model.y_resids().expect("residuals");
    let expected = rolling_median(&raw, window);

    assert!(model.residuals_filtered());
    assert_eq!(filtered.len(), raw.len());
    assert!(filtered[..=window].iter().all(|&v| v == 0.0));
    for i in (window + 1)..raw.len() {
        assert_relative_eq!(filtered[i], expected[i], epsilon = 1e-12);
    }
}

/// Test that a disabled filter leaves residuals untouched but is still timed.
#[test]
fn test_filter_disabled() {
    let frame = engine_frame(20, 0);
    let mut model = exact_model(&["Shaft Power"]);
    model.split(&frame, &frame).expect("split");
    model.fit().expect("fit");
    model.predict().expect("predict");
    let raw = model.y_resids().expect("residuals").to_vec();

    model.filter_residuals(false, 3).expect("filter");

    assert_eq!(model.y_resids().expect("residuals"), raw.as_slice());
    assert!(!model.residuals_filtered());
    assert_eq!(model.timings().last().map(|t| t.stage), Some(Stage::Filter));
}

/// Test a window longer than the residual series.
///
/// Verifies that every residual is zeroed.
#[test]
fn test_filter_long_window_zeroes_all() {
    let train = engine_frame(20, 0);
    let test = engine_frame(5, 20);
    let mut model = exact_model(&["Shaft Power"]);
    model.split(&train, &test).expect("split");
    model.fit().expect("fit");
    model.predict().expect("predict");
    model.filter_residuals(true, 10).expect("filter");

    assert!(model.y_resids().expect("residuals").iter().all(|&v| v == 0.0));
}

// ============================================================================
// Stage Ordering Tests
// ============================================================================

/// Test that stages refuse to run before their prerequisites.
#[test]
fn test_stage_order_enforced() {
    let frame = engine_frame(20, 0);
    let mut model = exact_model(&["Shaft Power", "Sea Temp"]);

    assert_eq!(
        model.fit().unwrap_err(),
        BaselineError::StageOrder {
            stage: "fit",
            requires: "split"
        }
    );

    model.split(&frame, &frame).expect("split");
    assert_eq!(
        model.predict().unwrap_err(),
        BaselineError::StageOrder {
            stage: "predict",
            requires: "fit"
        }
    );
    assert_eq!(
        model.build_equation(4).unwrap_err(),
        BaselineError::StageOrder {
            stage: "equation",
            requires: "fit"
        }
    );

    model.fit().expect("fit");
    assert_eq!(
        model.compute_metrics(4, 2.0, 3.0).unwrap_err(),
        BaselineError::StageOrder {
            stage: "metrics",
            requires: "predict"
        }
    );
    assert_eq!(
        model.filter_residuals(true, 3).unwrap_err(),
        BaselineError::StageOrder {
            stage: "filter",
            requires: "predict"
        }
    );
}

/// Test per-stage timings after a full run.
#[test]
fn test_run_records_timings() {
    let frame = engine_frame(25, 0);
    let mut model = exact_model(&["Shaft Power", "Sea Temp"]);
    let total = model
        .run(&frame, &frame, &BaselineConfig::default())
        .expect("run");

    let stages: Vec<Stage> = model.timings().iter().map(|t| t.stage).collect();
    assert_eq!(
        stages,
        vec![
            Stage::Split,
            Stage::Fit,
            Stage::Predict,
            Stage::Correct,
            Stage::Equation,
            Stage::Metrics,
            Stage::Filter,
        ]
    );
    let sum: std::time::Duration = model.timings().iter().map(|t| t.elapsed).sum();
    assert_eq!(sum, total);
}

/// Test that a new split discards downstream results.
#[test]
fn test_resplit_resets_downstream() {
    let frame = engine_frame(25, 0);
    let mut model = exact_model(&["Shaft Power", "Sea Temp"]);
    model
        .run(&frame, &frame, &BaselineConfig::default())
        .expect("run");
    assert!(model.metrics().is_some());

    model.split(&frame, &frame).expect("split");
    assert!(model.ridge_fit().is_none());
    assert!(model.y_resids().is_none());
    assert!(model.metrics().is_none());
    assert!(model.equation().is_none());
}

/// Test that metrics track the current raw residuals.
///
/// Verifies:
/// - Filtered residuals cannot be scored
/// - A new prediction discards earlier metrics
/// - Scoring works again after re-predicting
#[test]
fn test_metrics_require_raw_residuals() {
    let frame = engine_frame(25, 0);
    let mut model = exact_model(&["Shaft Power", "Sea Temp"]);
    let config = BaselineConfig {
        filter_residuals: true,
        median_window: 3,
        ..BaselineConfig::default()
    };
    model.run(&frame, &frame, &config).expect("run");
    assert!(model.residuals_filtered());

    assert_eq!(
        model.compute_metrics(4, 2.0, 3.0).unwrap_err(),
        BaselineError::StageOrder {
            stage: "metrics",
            requires: "predict"
        }
    );

    model.predict().expect("predict");
    assert!(model.metrics().is_none());
    assert!(!model.residuals_filtered());

    model.compute_metrics(4, 2.0, 3.0).expect("metrics");
    assert!(model.metrics().is_some());
}

/// Test invalid stage arguments.
#[test]
fn test_stage_argument_validation() {
    let frame = engine_frame(20, 0);
    let mut model = exact_model(&["Shaft Power"]);
    model.split(&frame, &frame).expect("split");
    model.fit().expect("fit");
    model.predict().expect("predict");

    assert_eq!(model.build_equation(0).unwrap_err(), BaselineError::InvalidDigits(0));
    assert!(matches!(
        model.compute_metrics(4, -1.0, 3.0).unwrap_err(),
        BaselineError::InvalidMultiplier { name: "warning", .. }
    ));
    assert_eq!(
        model.filter_residuals(true, 0).unwrap_err(),
        BaselineError::InvalidWindow(0)
    );
}

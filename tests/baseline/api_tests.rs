//! Tests for the high-level builder API.
//!
//! These tests verify the public entry point:
//! - Required and optional builder parameters
//! - Duplicate parameter detection
//! - Merging of individual setters over a base configuration
//! - End-to-end fitting through the pipeline
//!
//! ## Test Organization
//!
//! 1. **Builder Validation** - Missing, duplicate and invalid parameters
//! 2. **Configuration Merge** - Setters, grids and base configs
//! 3. **Pipeline** - Fitting, plotting and model access

use approx::assert_relative_eq;
use baseline::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

/// `Load = 10 + 0.8·Speed + 0.1·Ambient` with a small deterministic wobble.
fn pump_frame(n: usize, offset: usize) -> Frame {
    let speed: Vec<f64> = (0..n).map(|i| 100.0 + 2.0 * (i + offset) as f64).collect();
    let ambient: Vec<f64> = (0..n).map(|i| 15.0 + (((i + offset) * 5) % 9) as f64).collect();
    let load: Vec<f64> = speed
        .iter()
        .zip(&ambient)
        .enumerate()
        .map(|(i, (s, a))| 10.0 + 0.8 * s + 0.1 * a + if i % 2 == 0 { 0.05 } else { -0.05 })
        .collect();

    Frame::from_columns([("Load", load), ("Speed", speed), ("Ambient", ambient)])
        .expect("pump frame should build")
}

fn builder() -> Baseline {
    Baseline::new()
        .unit("Plant 7")
        .equipment("Pump A")
        .target("Load")
        .features(["Speed", "Ambient"])
}

// ============================================================================
// Builder Validation Tests
// ============================================================================

/// Test that target and features are required.
#[test]
fn test_missing_required_parameters() {
    let err = Baseline::new().features(["Speed"]).build().unwrap_err();
    assert_eq!(err, BaselineError::MissingParameter { parameter: "target" });

    let err = Baseline::new().target("Load").build().unwrap_err();
    assert_eq!(
        err,
        BaselineError::MissingParameter {
            parameter: "features"
        }
    );
}

/// Test that setting a parameter twice is reported at build time.
///
/// Verifies:
/// - Plain setters
/// - The explicit grid and the log grid count as one parameter
#[test]
fn test_duplicate_parameters() {
    let err = builder().target("Speed").build().unwrap_err();
    assert_eq!(err, BaselineError::DuplicateParameter { parameter: "target" });

    let err = builder()
        .alphas(vec![1.0])
        .alpha_grid(-2.0, 2.0, 5)
        .build()
        .unwrap_err();
    assert_eq!(err, BaselineError::DuplicateParameter { parameter: "alphas" });
}

/// Test label validation through the builder.
#[test]
fn test_invalid_labels() {
    let err = Baseline::new()
        .target("Load")
        .features(Vec::<String>::new())
        .build()
        .unwrap_err();
    assert_eq!(err, BaselineError::NoFeatures);

    let err = Baseline::new()
        .target("Load")
        .features(["Speed", "Load"])
        .build()
        .unwrap_err();
    assert_eq!(err, BaselineError::DuplicateColumn("Load".to_string()));
}

/// Test rejection of invalid tuning values.
#[test]
fn test_invalid_tuning() {
    assert!(matches!(
        builder().alphas(vec![1.0, 0.0]).build().unwrap_err(),
        BaselineError::InvalidAlphas(_)
    ));
    assert!(matches!(
        builder().warn_multiplier(-2.0).build().unwrap_err(),
        BaselineError::InvalidMultiplier { name: "warning", .. }
    ));
    assert_eq!(
        builder().filter_residuals(0).build().unwrap_err(),
        BaselineError::InvalidWindow(0)
    );
}

// ============================================================================
// Configuration Merge Tests
// ============================================================================

/// Test that setters override a base configuration.
#[test]
fn test_setters_override_config() {
    let base = BaselineConfig {
        warn_multiplier: 1.0,
        alarm_multiplier: 4.0,
        ..BaselineConfig::default()
    };
    let pipeline = builder()
        .config(base)
        .alarm_multiplier(2.5)
        .filter_residuals(6)
        .figure_size(1200, 500)
        .build()
        .expect("valid builder");

    let config = pipeline.config();
    assert_relative_eq!(config.warn_multiplier, 1.0);
    assert_relative_eq!(config.alarm_multiplier, 2.5);
    assert!(config.filter_residuals);
    assert_eq!(config.median_window, 6);
    assert_eq!(config.figure_size, (1200, 500));
}

/// Test how the penalty grid is chosen.
///
/// Verifies:
/// - The default grid is `logspace(-3, 3, 50)`
/// - A log grid setter replaces it
/// - Explicit alphas are used as given
#[test]
fn test_alpha_grid_selection() {
    let default = builder().build().expect("valid builder");
    assert_eq!(default.model().ridge().alphas(), logspace(-3.0, 3.0, 50).as_slice());

    let grid = builder().alpha_grid(-1.0, 1.0, 3).build().expect("valid builder");
    assert_eq!(grid.model().ridge().alphas(), logspace(-1.0, 1.0, 3).as_slice());
    assert_eq!(
        grid.config().alphas,
        AlphaGrid {
            start: -1.0,
            stop: 1.0,
            num: 3
        }
    );

    let explicit = builder().alphas(vec![0.5, 5.0]).build().expect("valid builder");
    assert_eq!(explicit.model().ridge().alphas(), &[0.5, 5.0]);
}

/// Test the model key assembled by the builder.
#[test]
fn test_model_key() {
    let pipeline = builder().build().expect("valid builder");
    let key = pipeline.model().key();

    assert_eq!(key.unit, "Plant 7");
    assert_eq!(key.equipment, "Pump A");
    assert_eq!(key.primary(), "Speed");
    assert_eq!(key.secondary(), &["Ambient".to_string()]);
    assert_eq!(key.all_labels(), vec!["Load", "Speed", "Ambient"]);
}

// ============================================================================
// Pipeline Tests
// ============================================================================

/// Test an end-to-end fit through the builder.
///
/// Verifies:
/// - Every stage ran and was timed
/// - Coefficients are close to the generating model
/// - Limits follow the configured multipliers
/// - Residuals inside the training range classify below alarm
#[test]
fn test_pipeline_fit() {
    let train = pump_frame(80, 0);
    let test = pump_frame(30, 25);

    let mut pipeline = builder().round_digits(6).build().expect("valid builder");
    let total = pipeline.fit(&train, &test).expect("fit should succeed");

    let model = pipeline.model();
    assert_eq!(model.timings().len(), 7);
    assert!(total >= model.timings()[0].elapsed);

    let fit = model.ridge_fit().expect("fitted");
    assert_relative_eq!(fit.coefficients[0], 0.8, epsilon = 0.01);
    assert_relative_eq!(fit.coefficients[1], 0.1, epsilon = 0.02);

    let metrics = model.metrics().expect("metrics");
    assert!(metrics.r_squared > 0.99);
    assert_relative_eq!(metrics.alarm_limit / metrics.warning_limit, 1.5, epsilon = 1e-3);

    let bands: Vec<Band> = model
        .y_resids()
        .expect("residuals")
        .iter()
        .map(|&r| metrics.classify(r))
        .collect();
    assert_eq!(bands.len(), 30);
    assert!(bands.iter().all(|&b| b != Band::Alarm));
}

/// Test a fit with more precision than `f64` carries.
///
/// Verifies metrics, equation and title stay finite instead of turning NaN.
#[test]
fn test_pipeline_excess_precision() {
    let train = pump_frame(80, 0);
    let test = pump_frame(30, 25);

    let mut pipeline = builder()
        .round_digits(400)
        .equation_digits(400)
        .build()
        .expect("valid builder");
    pipeline.fit(&train, &test).expect("fit should succeed");

    let metrics = pipeline.model().metrics().expect("metrics");
    assert!(metrics.r_squared.is_finite());
    assert!(metrics.mean_abs_error.is_finite());
    assert!(metrics.alarm_limit.is_finite());

    let equation = pipeline.model().equation().expect("equation");
    assert!(equation.starts_with("Value="));
    assert!(!equation.contains("NaN"));
    assert!(!equation.contains("inf"));
}

/// Test that the plot needs a fitted pipeline.
#[test]
fn test_plot_requires_fit() {
    let pipeline = builder().build().expect("valid builder");
    assert!(matches!(
        pipeline.plot().unwrap_err(),
        BaselineError::StageOrder { stage: "plot", .. }
    ));
}

/// Test driving the stages by hand through `model_mut`.
#[test]
fn test_manual_stages() {
    let train = pump_frame(40, 0);
    let test = pump_frame(20, 40);
    let mut pipeline = builder().build().expect("valid builder");

    let model = pipeline.model_mut();
    model.split(&train, &test).expect("split");
    model.fit().expect("fit");
    model.predict().expect("predict");

    assert_eq!(pipeline.model().y_predicts().map(<[f64]>::len), Some(20));
    assert!(pipeline.model().metrics().is_none());

    let model = pipeline.into_model();
    assert_eq!(model.timings().len(), 3);
}

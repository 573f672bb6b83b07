//! Staged regression-and-diagnostics pipeline.
//!
//! ## Purpose
//!
//! This module owns a single equipment baseline from raw frames to scored
//! residuals. Each stage reads what earlier stages stored, writes its own
//! outputs and reports its elapsed wall time.
//!
//! ## Design notes
//!
//! * **Explicit stages**: Callers may drive the stages one at a time or use
//!   [`RegressionModel::run`].
//! * **Ordering**: A stage invoked before its prerequisite fails with
//!   `StageOrder` instead of operating on stale or missing data.
//! * **Observability**: Every stage runs inside a `debug_span` and logs its
//!   duration; the chosen alpha and metrics are logged at `info`.
//!
//! ## Key concepts
//!
//! * **Primary feature**: `features[0]`, the relationship shown in the plots.
//! * **Secondary features**: `features[1..]`, removed from the target to form
//!   the corrected series.
//! * **Corrected target**: `y - Σ_{j>=1} c_j x_j` on the test split.
//!
//! ## Stage dependencies
//!
//! ```text
//! split ─→ fit ─┬─→ predict ─→ metrics ─→ filter
//!               ├─→ correct
//!               └─→ equation
//! ```
//!
//! ## Invariants
//!
//! * All test-split series (`x_test` columns, `y_test`, predictions,
//!   residuals, corrected values) share one length.
//! * Residuals equal `y_test - y_predicts` until residual filtering runs.
//! * Re-running `split` discards every downstream output.
//!
//! ## Non-goals
//!
//! * This module does not render figures (see `plot`).
//! * This module does not persist models.

// External dependencies
use std::time::{Duration, Instant};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info};

// Internal dependencies
use crate::algorithms::ridge::{RidgeCV, RidgeFit};
use crate::engine::config::BaselineConfig;
use crate::engine::validator::Validator;
use crate::evaluation::equation::{corrected_equation, fitted_equation};
use crate::evaluation::metrics::Metrics;
use crate::math::stats::rolling_median;
use crate::primitives::errors::BaselineError;
use crate::primitives::frame::Frame;

// ============================================================================
// Model Key
// ============================================================================

/// Identity of a baseline: where it runs and which columns it relates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelKey {
    /// Installation the equipment belongs to (a vessel, a plant). May be empty.
    pub unit: String,

    /// Equipment name.
    pub equipment: String,

    /// Target column label.
    pub target: String,

    /// Feature column labels; the first is the primary feature.
    pub features: Vec<String>,
}

impl ModelKey {
    /// Create a key after checking its labels.
    pub fn new(
        unit: impl Into<String>,
        equipment: impl Into<String>,
        target: impl Into<String>,
        features: Vec<String>,
    ) -> Result<Self, BaselineError> {
        let target = target.into();
        Validator::validate_labels(&target, &features)?;
        Ok(Self {
            unit: unit.into(),
            equipment: equipment.into(),
            target,
            features,
        })
    }

    /// Primary feature label.
    pub fn primary(&self) -> &str {
        self.features.first().map(String::as_str).unwrap_or_default()
    }

    /// Secondary feature labels.
    pub fn secondary(&self) -> &[String] {
        self.features.get(1..).unwrap_or_default()
    }

    /// Target followed by every feature, in that order.
    pub fn all_labels(&self) -> Vec<&str> {
        core::iter::once(self.target.as_str())
            .chain(self.features.iter().map(String::as_str))
            .collect()
    }
}

// ============================================================================
// Stages
// ============================================================================

/// Pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Select columns and drop incomplete rows.
    Split,
    /// Cross-validated ridge fit.
    Fit,
    /// Test-split predictions and residuals.
    Predict,
    /// Secondary-feature correction of the target.
    Correct,
    /// Equation strings.
    Equation,
    /// Accuracy metrics and limits.
    Metrics,
    /// Rolling-median residual smoothing.
    Filter,
}

impl Stage {
    /// Lower-case stage name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Split => "split",
            Stage::Fit => "fit",
            Stage::Predict => "predict",
            Stage::Correct => "correct",
            Stage::Equation => "equation",
            Stage::Metrics => "metrics",
            Stage::Filter => "filter",
        }
    }
}

/// Elapsed wall time of one stage invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTiming {
    /// Which stage ran.
    pub stage: Stage,

    /// How long it took.
    pub elapsed: Duration,
}

/// Complete-case train/test data, column-major.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Split {
    /// Training features, one vector per feature.
    pub x_train: Vec<Vec<f64>>,

    /// Test features, one vector per feature.
    pub x_test: Vec<Vec<f64>>,

    /// Training target.
    pub y_train: Vec<f64>,

    /// Test target.
    pub y_test: Vec<f64>,
}

// ============================================================================
// Regression Model
// ============================================================================

/// One equipment baseline and every artifact derived from it.
#[derive(Debug, Clone)]
pub struct RegressionModel {
    key: ModelKey,
    ridge: RidgeCV,
    split: Option<Split>,
    fit: Option<RidgeFit>,
    y_predicts: Option<Vec<f64>>,
    y_resids: Option<Vec<f64>>,
    y_corrected: Option<Vec<f64>>,
    equation: Option<String>,
    corrected_equation: Option<String>,
    metrics: Option<Metrics>,
    residuals_filtered: bool,
    timings: Vec<StageTiming>,
}

impl RegressionModel {
    /// Create an unfitted model with the given penalty grid.
    pub fn new(key: ModelKey, ridge: RidgeCV) -> Self {
        Self {
            key,
            ridge,
            split: None,
            fit: None,
            y_predicts: None,
            y_resids: None,
            y_corrected: None,
            equation: None,
            corrected_equation: None,
            metrics: None,
            residuals_filtered: false,
            timings: Vec::new(),
        }
    }

    // ========================================================================
    // Stages
    // ========================================================================

    /// Select `target + features` from both frames and drop incomplete rows.
    pub fn split(&mut self, train: &Frame, test: &Frame) -> Result<Duration, BaselineError> {
        self.timed(Stage::Split, |model| {
            let labels = model.key.all_labels();
            let train = train.select_complete(&labels)?;
            let test = test.select_complete(&labels)?;
            Validator::validate_split("train", train.len())?;
            Validator::validate_split("test", test.len())?;

            let features = |frame: &Frame| -> Result<Vec<Vec<f64>>, BaselineError> {
                model
                    .key
                    .features
                    .iter()
                    .map(|label| frame.column(label).map(<[f64]>::to_vec))
                    .collect()
            };

            let split = Split {
                x_train: features(&train)?,
                x_test: features(&test)?,
                y_train: train.column(&model.key.target)?.to_vec(),
                y_test: test.column(&model.key.target)?.to_vec(),
            };
            debug!(
                train_rows = split.y_train.len(),
                test_rows = split.y_test.len(),
                "complete rows selected"
            );

            model.reset_downstream();
            model.split = Some(split);
            Ok(())
        })
    }

    /// Fit the cross-validated ridge model on the training split.
    pub fn fit(&mut self) -> Result<Duration, BaselineError> {
        self.timed(Stage::Fit, |model| {
            let split = model.require_split(Stage::Fit)?;
            Validator::validate_alphas(model.ridge.alphas())?;
            Validator::validate_design(&split.x_train, &split.y_train)?;

            let fit = model.ridge.fit(&split.x_train, &split.y_train)?;
            info!(
                equipment = %model.key.equipment,
                alpha = fit.alpha,
                cv_score = fit.best_cv_score().unwrap_or(f64::NAN),
                "ridge penalty selected"
            );
            model.fit = Some(fit);
            Ok(())
        })
    }

    /// Predict the test split and compute `residual = actual - predicted`.
    ///
    /// Metrics from an earlier prediction are discarded.
    pub fn predict(&mut self) -> Result<Duration, BaselineError> {
        self.timed(Stage::Predict, |model| {
            let fit = model.require_fit(Stage::Predict)?;
            let split = model.require_split(Stage::Predict)?;
            let predicts = fit.predict(&split.x_test)?;
            let resids = split
                .y_test
                .iter()
                .zip(&predicts)
                .map(|(y, yhat)| y - yhat)
                .collect();

            model.y_predicts = Some(predicts);
            model.y_resids = Some(resids);
            model.residuals_filtered = false;
            model.metrics = None;
            Ok(())
        })
    }

    /// Remove the secondary-feature contribution from the test target.
    pub fn correct(&mut self) -> Result<Duration, BaselineError> {
        self.timed(Stage::Correct, |model| {
            let fit = model.require_fit(Stage::Correct)?;
            let split = model.require_split(Stage::Correct)?;

            let mut corrected = split.y_test.clone();
            for (coef, column) in fit.coefficients.iter().zip(&split.x_test).skip(1) {
                for (value, x) in corrected.iter_mut().zip(column) {
                    *value -= coef * x;
                }
            }
            model.y_corrected = Some(corrected);
            Ok(())
        })
    }

    /// Build the fitted and corrected equation strings.
    pub fn build_equation(&mut self, digits: u32) -> Result<Duration, BaselineError> {
        self.timed(Stage::Equation, |model| {
            Validator::validate_significant_digits(digits)?;
            let fit = model.require_fit(Stage::Equation)?;

            let equation =
                fitted_equation(&model.key.features, &fit.coefficients, fit.intercept, digits)?;
            let corrected = corrected_equation(
                &model.key.target,
                model.key.secondary(),
                fit.coefficients.get(1..).unwrap_or_default(),
                digits,
            )?;
            debug!(%equation, corrected = %corrected, "equations built");

            model.equation = Some(equation);
            model.corrected_equation = Some(corrected);
            Ok(())
        })
    }

    /// Score the test split and derive the warning and alarm limits.
    ///
    /// Scores raw residuals only: once they are filtered, `predict` must run
    /// again first.
    pub fn compute_metrics(
        &mut self,
        digits: u32,
        warn: f64,
        alarm: f64,
    ) -> Result<Duration, BaselineError> {
        self.timed(Stage::Metrics, |model| {
            Validator::validate_multiplier("warning", warn)?;
            Validator::validate_multiplier("alarm", alarm)?;
            let split = model.require_split(Stage::Metrics)?;
            let (predicts, resids) = match (&model.y_predicts, &model.y_resids) {
                (Some(p), Some(r)) => (p, r),
                _ => return Err(order_error(Stage::Metrics, Stage::Predict)),
            };
            if model.residuals_filtered {
                return Err(order_error(Stage::Metrics, Stage::Predict));
            }
            Validator::validate_residuals(resids)?;

            let metrics = Metrics::compute(&split.y_test, predicts, resids, digits, warn, alarm);
            info!(
                equipment = %model.key.equipment,
                r_squared = metrics.r_squared,
                mae = metrics.mean_abs_error,
                warning = metrics.warning_limit,
                alarm = metrics.alarm_limit,
                "baseline scored"
            );
            model.metrics = Some(metrics);
            Ok(())
        })
    }

    /// Optionally replace residuals by their trailing rolling median.
    ///
    /// The first `window + 1` entries (or all of them, for a shorter series)
    /// are set to zero. A disabled filter still records its timing.
    pub fn filter_residuals(
        &mut self,
        enabled: bool,
        window: usize,
    ) -> Result<Duration, BaselineError> {
        self.timed(Stage::Filter, |model| {
            if !enabled {
                return Ok(());
            }
            Validator::validate_window(window)?;
            let resids = model
                .y_resids
                .as_mut()
                .ok_or_else(|| order_error(Stage::Filter, Stage::Predict))?;

            let mut smoothed = rolling_median(resids.as_slice(), window);
            let lead = (window + 1).min(smoothed.len());
            smoothed[..lead].fill(0.0);
            *resids = smoothed;
            model.residuals_filtered = true;
            Ok(())
        })
    }

    /// Run every stage in order and return the total elapsed time.
    pub fn run(
        &mut self,
        train: &Frame,
        test: &Frame,
        config: &BaselineConfig,
    ) -> Result<Duration, BaselineError> {
        config.validate()?;
        let total = self.split(train, test)?
            + self.fit()?
            + self.predict()?
            + self.correct()?
            + self.build_equation(config.equation_digits)?
            + self.compute_metrics(
                config.round_digits,
                config.warn_multiplier,
                config.alarm_multiplier,
            )?
            + self.filter_residuals(config.filter_residuals, config.median_window)?;
        Ok(total)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Model identity.
    pub fn key(&self) -> &ModelKey {
        &self.key
    }

    /// Penalty grid used by `fit`.
    pub fn ridge(&self) -> &RidgeCV {
        &self.ridge
    }

    /// Complete-case train/test data, once split.
    pub fn data(&self) -> Option<&Split> {
        self.split.as_ref()
    }

    /// Fitted ridge model.
    pub fn ridge_fit(&self) -> Option<&RidgeFit> {
        self.fit.as_ref()
    }

    /// Test-split target.
    pub fn y_test(&self) -> Option<&[f64]> {
        self.split.as_ref().map(|s| s.y_test.as_slice())
    }

    /// Test-split primary feature.
    pub fn primary_test(&self) -> Option<&[f64]> {
        self.split
            .as_ref()
            .and_then(|s| s.x_test.first())
            .map(Vec::as_slice)
    }

    /// Test-split predictions.
    pub fn y_predicts(&self) -> Option<&[f64]> {
        self.y_predicts.as_deref()
    }

    /// Test-split residuals, smoothed if residual filtering ran.
    pub fn y_resids(&self) -> Option<&[f64]> {
        self.y_resids.as_deref()
    }

    /// Corrected test target.
    pub fn y_corrected(&self) -> Option<&[f64]> {
        self.y_corrected.as_deref()
    }

    /// Fitted equation, `Value=...`.
    pub fn equation(&self) -> Option<&str> {
        self.equation.as_deref()
    }

    /// Corrected equation, `Value=Target - ...`.
    pub fn corrected_equation(&self) -> Option<&str> {
        self.corrected_equation.as_deref()
    }

    /// Accuracy metrics and limits.
    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    /// Whether the stored residuals are rolling medians.
    pub fn residuals_filtered(&self) -> bool {
        self.residuals_filtered
    }

    /// Every stage invocation so far, oldest first.
    pub fn timings(&self) -> &[StageTiming] {
        &self.timings
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn timed<F>(&mut self, stage: Stage, body: F) -> Result<Duration, BaselineError>
    where
        F: FnOnce(&mut Self) -> Result<(), BaselineError>,
    {
        let span = debug_span!(
            "stage",
            stage = stage.name(),
            equipment = %self.key.equipment,
            target = %self.key.target
        );
        let _enter = span.enter();

        let start = Instant::now();
        body(self)?;
        let elapsed = start.elapsed();

        debug!(elapsed_ms = elapsed.as_secs_f64() * 1e3, "stage complete");
        self.timings.push(StageTiming { stage, elapsed });
        Ok(elapsed)
    }

    fn require_split(&self, stage: Stage) -> Result<&Split, BaselineError> {
        self.split
            .as_ref()
            .ok_or_else(|| order_error(stage, Stage::Split))
    }

    fn require_fit(&self, stage: Stage) -> Result<&RidgeFit, BaselineError> {
        self.fit.as_ref().ok_or_else(|| order_error(stage, Stage::Fit))
    }

    fn reset_downstream(&mut self) {
        self.fit = None;
        self.y_predicts = None;
        self.y_resids = None;
        self.y_corrected = None;
        self.equation = None;
        self.corrected_equation = None;
        self.metrics = None;
        self.residuals_filtered = false;
    }
}

fn order_error(stage: Stage, requires: Stage) -> BaselineError {
    BaselineError::StageOrder {
        stage: stage.name(),
        requires: requires.name(),
    }
}

//! High-level API for equipment baselines.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for naming the baseline, choosing its columns and tuning
//! the run, and returns a [`BaselinePipeline`] ready to fit.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for every tuning knob.
//! * **Validated**: Labels, grid and thresholds are checked when `.build()` is called.
//! * **Deferred errors**: Setting a parameter twice is recorded and reported by `.build()`.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`BaselineBuilder`] via `Baseline::new()`.
//! 2. Name the columns (`.target()`, `.features()`) and optionally the
//!    unit and equipment.
//! 3. Tune the run (`.alphas()`, `.warn_multiplier()`, `.filter_residuals()`, ...)
//!    or pass a whole [`BaselineConfig`] with `.config()`.
//! 4. Call `.build()` and then `.fit(&train, &test)` on the pipeline.

// External dependencies
use std::time::Duration;

// Internal dependencies
use crate::algorithms::ridge::RidgeCV;
use crate::engine::config::{AlphaGrid, BaselineConfig};
use crate::engine::model::{ModelKey, RegressionModel};
use crate::engine::validator::Validator;
use crate::primitives::frame::Frame;

// Publicly re-exported types
pub use crate::algorithms::ridge::RidgeFit;
pub use crate::engine::model::{Split, Stage, StageTiming};
pub use crate::evaluation::metrics::{Band, Metrics};
pub use crate::primitives::errors::BaselineError;
pub use crate::plot::{Panel, RegressionPlot};

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a baseline.
#[derive(Debug, Clone, Default)]
pub struct BaselineBuilder {
    /// Installation name used in the plot title.
    pub unit: Option<String>,

    /// Equipment name.
    pub equipment: Option<String>,

    /// Target column label.
    pub target: Option<String>,

    /// Feature column labels, primary first.
    pub features: Option<Vec<String>>,

    /// Explicit penalty grid; overrides the configured log grid.
    pub alphas: Option<Vec<f64>>,

    /// Log-spaced penalty grid.
    pub alpha_grid: Option<AlphaGrid>,

    /// Decimal places for metrics.
    pub round_digits: Option<u32>,

    /// Significant digits for equations.
    pub equation_digits: Option<u32>,

    /// Warning limit multiplier.
    pub warn_multiplier: Option<f64>,

    /// Alarm limit multiplier.
    pub alarm_multiplier: Option<f64>,

    /// Rolling median window, enabling residual smoothing.
    pub median_window: Option<usize>,

    /// Figure size in pixels.
    pub figure_size: Option<(u32, u32)>,

    /// Base configuration that individual setters override.
    pub config: Option<BaselineConfig>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl BaselineBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the installation name (a vessel, a plant).
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        if self.unit.is_some() {
            self.duplicate_param = Some("unit");
        }
        self.unit = Some(unit.into());
        self
    }

    /// Set the equipment name.
    pub fn equipment(mut self, equipment: impl Into<String>) -> Self {
        if self.equipment.is_some() {
            self.duplicate_param = Some("equipment");
        }
        self.equipment = Some(equipment.into());
        self
    }

    /// Set the target column.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        if self.target.is_some() {
            self.duplicate_param = Some("target");
        }
        self.target = Some(target.into());
        self
    }

    /// Set the feature columns; the first one is the primary feature.
    pub fn features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.features.is_some() {
            self.duplicate_param = Some("features");
        }
        self.features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    /// Use an explicit penalty grid.
    pub fn alphas(mut self, alphas: Vec<f64>) -> Self {
        if self.alphas.is_some() || self.alpha_grid.is_some() {
            self.duplicate_param = Some("alphas");
        }
        self.alphas = Some(alphas);
        self
    }

    /// Use `num` penalties log-spaced from `10^start` to `10^stop`.
    pub fn alpha_grid(mut self, start: f64, stop: f64, num: usize) -> Self {
        if self.alphas.is_some() || self.alpha_grid.is_some() {
            self.duplicate_param = Some("alphas");
        }
        self.alpha_grid = Some(AlphaGrid { start, stop, num });
        self
    }

    /// Set the decimal places kept in metrics.
    pub fn round_digits(mut self, digits: u32) -> Self {
        if self.round_digits.is_some() {
            self.duplicate_param = Some("round_digits");
        }
        self.round_digits = Some(digits);
        self
    }

    /// Set the significant digits kept in equations.
    pub fn equation_digits(mut self, digits: u32) -> Self {
        if self.equation_digits.is_some() {
            self.duplicate_param = Some("equation_digits");
        }
        self.equation_digits = Some(digits);
        self
    }

    /// Set the warning limit multiplier.
    pub fn warn_multiplier(mut self, multiplier: f64) -> Self {
        if self.warn_multiplier.is_some() {
            self.duplicate_param = Some("warn_multiplier");
        }
        self.warn_multiplier = Some(multiplier);
        self
    }

    /// Set the alarm limit multiplier.
    pub fn alarm_multiplier(mut self, multiplier: f64) -> Self {
        if self.alarm_multiplier.is_some() {
            self.duplicate_param = Some("alarm_multiplier");
        }
        self.alarm_multiplier = Some(multiplier);
        self
    }

    /// Smooth residuals with a trailing rolling median of this width.
    pub fn filter_residuals(mut self, window: usize) -> Self {
        if self.median_window.is_some() {
            self.duplicate_param = Some("filter_residuals");
        }
        self.median_window = Some(window);
        self
    }

    /// Set the figure size in pixels.
    pub fn figure_size(mut self, width: u32, height: u32) -> Self {
        if self.figure_size.is_some() {
            self.duplicate_param = Some("figure_size");
        }
        self.figure_size = Some((width, height));
        self
    }

    /// Start from a complete configuration.
    pub fn config(mut self, config: BaselineConfig) -> Self {
        if self.config.is_some() {
            self.duplicate_param = Some("config");
        }
        self.config = Some(config);
        self
    }

    /// Validate every parameter and create the pipeline.
    pub fn build(self) -> Result<BaselinePipeline, BaselineError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let target = self
            .target
            .ok_or(BaselineError::MissingParameter { parameter: "target" })?;
        let features = self
            .features
            .ok_or(BaselineError::MissingParameter { parameter: "features" })?;
        let key = ModelKey::new(
            self.unit.unwrap_or_default(),
            self.equipment.unwrap_or_default(),
            target,
            features,
        )?;

        let mut config = self.config.unwrap_or_default();
        if let Some(grid) = self.alpha_grid {
            config.alphas = grid;
        }
        if let Some(digits) = self.round_digits {
            config.round_digits = digits;
        }
        if let Some(digits) = self.equation_digits {
            config.equation_digits = digits;
        }
        if let Some(warn) = self.warn_multiplier {
            config.warn_multiplier = warn;
        }
        if let Some(alarm) = self.alarm_multiplier {
            config.alarm_multiplier = alarm;
        }
        if let Some(window) = self.median_window {
            config.filter_residuals = true;
            config.median_window = window;
        }
        if let Some(size) = self.figure_size {
            config.figure_size = size;
        }
        config.validate()?;

        let alphas = self.alphas.unwrap_or_else(|| config.alphas.values());
        Validator::validate_alphas(&alphas)?;

        Ok(BaselinePipeline {
            model: RegressionModel::new(key, RidgeCV::new(alphas)),
            config,
        })
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// A configured baseline ready to fit.
#[derive(Debug, Clone)]
pub struct BaselinePipeline {
    model: RegressionModel,
    config: BaselineConfig,
}

impl BaselinePipeline {
    /// Run every stage on the given train and test frames.
    pub fn fit(&mut self, train: &Frame, test: &Frame) -> Result<Duration, BaselineError> {
        self.model.run(train, test, &self.config)
    }

    /// The underlying staged model.
    pub fn model(&self) -> &RegressionModel {
        &self.model
    }

    /// Mutable access for driving stages individually.
    pub fn model_mut(&mut self) -> &mut RegressionModel {
        &mut self.model
    }

    /// Effective configuration.
    pub fn config(&self) -> &BaselineConfig {
        &self.config
    }

    /// Consume the pipeline, keeping the model.
    pub fn into_model(self) -> RegressionModel {
        self.model
    }

    /// Diagnostic figure for the fitted model.
    pub fn plot(&self) -> Result<RegressionPlot<'_>, BaselineError> {
        RegressionPlot::new(&self.model)
    }

    /// Render the diagnostic figure to an SVG file at the configured size.
    #[cfg(feature = "plot")]
    pub fn render_svg(&self, path: impl AsRef<std::path::Path>) -> Result<(), BaselineError> {
        self.plot()?.render_svg(path, self.config.figure_size)
    }
}

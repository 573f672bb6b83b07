//! Pipeline configuration.
//!
//! ## Purpose
//!
//! This module holds the caller-supplied scalars that steer a pipeline run:
//! the alpha grid, rounding precision, warning/alarm multipliers, residual
//! smoothing and figure size. A configuration can be built in code or read
//! from JSON:
//!
//! ```json
//! {
//!   "alphas": { "start": -3.0, "stop": 3.0, "num": 50 },
//!   "round_digits": 4,
//!   "warn_multiplier": 2.0,
//!   "alarm_multiplier": 3.0,
//!   "filter_residuals": true,
//!   "median_window": 10
//! }
//! ```
//!
//! Omitted fields take their defaults.

// External dependencies
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::math::stats::logspace;
use crate::primitives::errors::BaselineError;

// ============================================================================
// Alpha Grid
// ============================================================================

/// Logarithmic grid of ridge penalties, `10^start ..= 10^stop` in `num` steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlphaGrid {
    /// Base-10 exponent of the smallest alpha.
    pub start: f64,

    /// Base-10 exponent of the largest alpha.
    pub stop: f64,

    /// Number of grid points.
    pub num: usize,
}

impl Default for AlphaGrid {
    fn default() -> Self {
        Self {
            start: -3.0,
            stop: 3.0,
            num: 50,
        }
    }
}

impl AlphaGrid {
    /// Materialize the grid.
    pub fn values(&self) -> Vec<f64> {
        logspace(self.start, self.stop, self.num)
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Scalars controlling a full pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// Ridge penalty grid.
    pub alphas: AlphaGrid,

    /// Decimal places kept in reported metrics.
    pub round_digits: u32,

    /// Significant digits kept in equation coefficients.
    pub equation_digits: u32,

    /// Warning limit as a multiple of the residual standard deviation.
    pub warn_multiplier: f64,

    /// Alarm limit as a multiple of the residual standard deviation.
    pub alarm_multiplier: f64,

    /// Replace residuals by their rolling median after scoring.
    pub filter_residuals: bool,

    /// Rolling median window length.
    pub median_window: usize,

    /// Diagnostic figure size in pixels (width, height).
    pub figure_size: (u32, u32),
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            alphas: AlphaGrid::default(),
            round_digits: 4,
            equation_digits: 4,
            warn_multiplier: 2.0,
            alarm_multiplier: 3.0,
            filter_residuals: false,
            median_window: 10,
            figure_size: (2400, 1000),
        }
    }
}

impl BaselineConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, BaselineError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| BaselineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BaselineError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| BaselineError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, BaselineError> {
        serde_json::to_string_pretty(self).map_err(|e| BaselineError::Config(e.to_string()))
    }

    /// Check every field against its bounds.
    pub fn validate(&self) -> Result<(), BaselineError> {
        Validator::validate_alphas(&self.alphas.values())?;
        Validator::validate_significant_digits(self.equation_digits)?;
        Validator::validate_multiplier("warning", self.warn_multiplier)?;
        Validator::validate_multiplier("alarm", self.alarm_multiplier)?;
        Validator::validate_window(self.median_window)?;
        if self.figure_size.0 == 0 || self.figure_size.1 == 0 {
            return Err(BaselineError::Config(format!(
                "figure_size {:?} must be non-zero",
                self.figure_size
            )));
        }
        Ok(())
    }
}

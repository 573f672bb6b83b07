//! Input validation for baseline configuration and data.
//!
//! ## Purpose
//!
//! This module provides validation functions for model labels, regression
//! inputs and pipeline parameters. The pipeline refuses to fit on data it
//! cannot interpret instead of letting a numeric routine fail deep inside.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//!
//! ## Key concepts
//!
//! * **Labels**: A target and at least one feature, all distinct.
//! * **Finite Checks**: Regression inputs contain no NaN/Inf after row filtering.
//! * **Parameter Bounds**: Positive alphas, non-negative multipliers, window >= 1.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not filter, transform or repair input data.
//! * This module does not perform the fitting itself.

// Internal dependencies
use crate::primitives::errors::BaselineError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for baseline configuration and input data.
///
/// All methods return `Result<(), BaselineError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Label Validation
    // ========================================================================

    /// Validate the target and feature labels of a model.
    pub fn validate_labels<S: AsRef<str>>(target: &str, features: &[S]) -> Result<(), BaselineError> {
        // Check 1: At least a primary feature
        if features.is_empty() {
            return Err(BaselineError::NoFeatures);
        }

        // Check 2: Distinct labels across target and features
        let mut seen: Vec<&str> = Vec::with_capacity(features.len() + 1);
        seen.push(target);
        for label in features {
            let label = label.as_ref();
            if seen.contains(&label) {
                return Err(BaselineError::DuplicateColumn(label.to_string()));
            }
            seen.push(label);
        }

        Ok(())
    }

    // ========================================================================
    // Data Validation
    // ========================================================================

    /// Validate a split after incomplete rows were dropped.
    pub fn validate_split(split: &'static str, rows: usize) -> Result<(), BaselineError> {
        if rows == 0 {
            return Err(BaselineError::EmptyInput { split });
        }
        Ok(())
    }

    /// Validate column-major regression inputs.
    pub fn validate_design(columns: &[Vec<f64>], y: &[f64]) -> Result<(), BaselineError> {
        // Check 1: Features present
        if columns.is_empty() {
            return Err(BaselineError::NoFeatures);
        }

        // Check 2: Enough rows for a centered fit
        let n = y.len();
        if n < 2 {
            return Err(BaselineError::TooFewPoints { got: n, min: 2 });
        }

        // Check 3: Matching lengths
        for (j, col) in columns.iter().enumerate() {
            if col.len() != n {
                return Err(BaselineError::MismatchedLengths {
                    column: format!("feature[{j}]"),
                    expected: n,
                    got: col.len(),
                });
            }
        }

        // Check 4: All values finite
        if let Some(i) = y.iter().position(|v| !v.is_finite()) {
            return Err(BaselineError::InvalidNumericValue(format!("y[{i}]={}", y[i])));
        }
        for (j, col) in columns.iter().enumerate() {
            if let Some(i) = col.iter().position(|v| !v.is_finite()) {
                return Err(BaselineError::InvalidNumericValue(format!(
                    "feature[{j}][{i}]={}",
                    col[i]
                )));
            }
        }

        Ok(())
    }

    /// Validate that a residual series can carry a sample standard deviation.
    pub fn validate_residuals(residuals: &[f64]) -> Result<(), BaselineError> {
        if residuals.len() < 2 {
            return Err(BaselineError::TooFewPoints {
                got: residuals.len(),
                min: 2,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the regularization grid.
    pub fn validate_alphas(alphas: &[f64]) -> Result<(), BaselineError> {
        if alphas.is_empty() {
            return Err(BaselineError::InvalidAlphas("grid is empty".to_string()));
        }
        if let Some(bad) = alphas.iter().find(|a| !a.is_finite() || **a <= 0.0) {
            return Err(BaselineError::InvalidAlphas(format!(
                "{bad} (must be > 0 and finite)"
            )));
        }
        Ok(())
    }

    /// Validate a warning or alarm multiplier.
    pub fn validate_multiplier(name: &'static str, value: f64) -> Result<(), BaselineError> {
        if !value.is_finite() || value < 0.0 {
            return Err(BaselineError::InvalidMultiplier { name, value });
        }
        Ok(())
    }

    /// Validate the rolling median window.
    pub fn validate_window(window: usize) -> Result<(), BaselineError> {
        if window == 0 {
            return Err(BaselineError::InvalidWindow(window));
        }
        Ok(())
    }

    /// Validate significant-digit precision for equations.
    pub fn validate_significant_digits(digits: u32) -> Result<(), BaselineError> {
        if digits == 0 {
            return Err(BaselineError::InvalidDigits(digits));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), BaselineError> {
        if let Some(param) = duplicate_param {
            return Err(BaselineError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}

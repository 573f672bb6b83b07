//! Accuracy metrics and residual alarm limits.
//!
//! ## Purpose
//!
//! This module scores a fitted baseline on the held-out split and derives
//! the residual bands used to flag anomalous readings.
//!
//! ## Design notes
//!
//! * **Residual-based**: Limits are multiples of the residual standard deviation.
//! * **Sample scale**: The residual standard deviation uses `n - 1`.
//! * **Rounding**: Reported metrics are rounded to a fixed number of decimal places.
//! * **Generics**: Score functions are generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **R²**: `1 - SS_res / SS_tot`.
//! * **Explained variance**: `1 - Var(y - ŷ) / Var(y)`; ignores a constant bias in ŷ.
//! * **Warning / alarm limit**: `multiplier × sd(residuals)`, plotted as `±limit`.
//!
//! ## Invariants
//!
//! * MAE and both limits are non-negative.
//! * R² <= 1 and explained variance <= 1.
//! * Limits scale linearly with their multiplier.

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use num_traits::Float;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::stats::{mean, std_dev, variance};

// ============================================================================
// Metrics Structure
// ============================================================================

/// Accuracy metrics and alarm limits for one fitted baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Coefficient of determination on the test split.
    pub r_squared: f64,

    /// Mean absolute error on the test split.
    pub mean_abs_error: f64,

    /// Explained variance score on the test split.
    pub explained_variance: f64,

    /// Half-width of the warning band around zero residual.
    pub warning_limit: f64,

    /// Half-width of the alarm band around zero residual.
    pub alarm_limit: f64,
}

impl Metrics {
    /// Score predictions and derive limits, rounding every value to
    /// `digits` decimal places.
    pub fn compute(
        y_true: &[f64],
        y_pred: &[f64],
        residuals: &[f64],
        digits: u32,
        warn: f64,
        alarm: f64,
    ) -> Self {
        let residual_sd = std_dev(residuals, 1);

        Self {
            r_squared: round_to(r2_score(y_true, y_pred), digits),
            mean_abs_error: round_to(mean_absolute_error(y_true, y_pred), digits),
            explained_variance: round_to(explained_variance_score(y_true, y_pred), digits),
            warning_limit: round_to(threshold(warn, residual_sd), digits),
            alarm_limit: round_to(threshold(alarm, residual_sd), digits),
        }
    }

    /// Classify a residual against the bands.
    pub fn classify(&self, residual: f64) -> Band {
        let magnitude = residual.abs();
        if magnitude > self.alarm_limit {
            Band::Alarm
        } else if magnitude > self.warning_limit {
            Band::Warning
        } else {
            Band::Normal
        }
    }
}

/// Which band a residual falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    /// Within the warning limit.
    Normal,

    /// Beyond the warning limit, within the alarm limit.
    Warning,

    /// Beyond the alarm limit.
    Alarm,
}

// ============================================================================
// Score Functions
// ============================================================================

/// Coefficient of determination.
///
/// A constant target scores 1 for a perfect prediction and 0 otherwise.
pub fn r2_score<T: Float>(y_true: &[T], y_pred: &[T]) -> T {
    let m = mean(y_true);
    let (ss_tot, ss_res) = y_true.iter().zip(y_pred).fold(
        (T::zero(), T::zero()),
        |(tot, res), (&yt, &yp)| {
            let deviation = yt - m;
            let residual = yt - yp;
            (tot + deviation * deviation, res + residual * residual)
        },
    );

    if ss_tot == T::zero() {
        if ss_res == T::zero() { T::one() } else { T::zero() }
    } else {
        T::one() - ss_res / ss_tot
    }
}

/// Mean absolute error.
pub fn mean_absolute_error<T: Float>(y_true: &[T], y_pred: &[T]) -> T {
    let n = T::from(y_true.len()).unwrap_or(T::one());
    if y_true.is_empty() {
        return T::zero();
    }
    y_true
        .iter()
        .zip(y_pred)
        .fold(T::zero(), |acc, (&yt, &yp)| acc + (yt - yp).abs())
        / n
}

/// Explained variance score, `1 - Var(y - ŷ) / Var(y)` with population variances.
pub fn explained_variance_score<T: Float>(y_true: &[T], y_pred: &[T]) -> T {
    let diff: Vec<T> = y_true.iter().zip(y_pred).map(|(&yt, &yp)| yt - yp).collect();
    let numerator = variance(&diff, 0);
    let denominator = variance(y_true, 0);

    if denominator == T::zero() {
        if numerator == T::zero() { T::one() } else { T::zero() }
    } else {
        T::one() - numerator / denominator
    }
}

/// Residual band half-width for a multiplier.
#[inline]
pub fn threshold<T: Float>(multiplier: T, residual_sd: T) -> T {
    multiplier * residual_sd
}

/// Round to `digits` decimal places, halves away from zero.
///
/// When the scaled value is not representable, `value` is returned unchanged.
pub fn round_to<T: Float>(value: T, digits: u32) -> T {
    if !value.is_finite() || digits > f64::MAX_10_EXP as u32 {
        return value;
    }
    let factor = match T::from(10f64.powi(digits as i32)) {
        Some(factor) if factor.is_finite() => factor,
        _ => return value,
    };
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for Metrics {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Baseline Metrics:")?;
        writeln!(f, "  R²:                 {}", self.r_squared)?;
        writeln!(f, "  MAE:                {}", self.mean_abs_error)?;
        writeln!(f, "  Explained variance: {}", self.explained_variance)?;
        writeln!(f, "  Warning limit:      ±{}", self.warning_limit)?;
        writeln!(f, "  Alarm limit:        ±{}", self.alarm_limit)?;
        Ok(())
    }
}

//! Cross-validated ridge regression.
//!
//! ## Purpose
//!
//! This module fits the linear baseline `y = b + Σ c_j x_j` with an L2
//! penalty on the coefficients, choosing the penalty strength from a grid
//! by leave-one-out cross-validation.
//!
//! ## Design notes
//!
//! * **Normalization**: Features are centered and scaled to unit L2 norm
//!   before penalization; reported coefficients are on the original scale.
//! * **Intercept**: Handled by centering and never penalized.
//! * **One decomposition**: The normalized Gram matrix `XᵀX = V Λ Vᵀ` is
//!   decomposed once. For every alpha the fit and the hat-matrix diagonal
//!   follow in closed form, so the whole grid costs `O(n·p·|grid|)` after an
//!   `O(n·p² + p³)` setup.
//! * **Leave-one-out**: The LOO residual of row `i` is `r_i / (1 - h_ii)`,
//!   where `h_ii` includes the `1/n` intercept leverage.
//!
//! ## Key concepts
//!
//! * **Alpha grid**: Candidate penalty strengths, conventionally `logspace(-3, 3, 50)`.
//! * **CV score**: Mean squared LOO residual for one alpha; lower is better.
//!
//! ## Invariants
//!
//! * The selected alpha is the first grid entry with the minimum CV score.
//! * `cv_scores` has one entry per grid alpha, in grid order.
//!
//! ## Non-goals
//!
//! * This module does not validate finiteness of inputs or grid positivity
//!   (see `engine::validator`).
//! * This module does not support per-target alphas or sample weights.

// External dependencies
use core::cmp::Ordering::Equal;
use nalgebra::SymmetricEigen;

// Internal dependencies
use crate::math::linalg::center_and_normalize;
use crate::math::stats::logspace;
use crate::primitives::errors::BaselineError;

// ============================================================================
// Fit Result
// ============================================================================

/// Fitted ridge model on the original feature scale.
#[derive(Debug, Clone, PartialEq)]
pub struct RidgeFit {
    /// One coefficient per feature, in feature order.
    pub coefficients: Vec<f64>,

    /// Unpenalized intercept.
    pub intercept: f64,

    /// Penalty strength selected by cross-validation.
    pub alpha: f64,

    /// Mean squared leave-one-out error for each grid alpha.
    pub cv_scores: Vec<f64>,
}

impl RidgeFit {
    /// Predict the target for column-major feature data.
    pub fn predict(&self, columns: &[Vec<f64>]) -> Result<Vec<f64>, BaselineError> {
        if columns.len() != self.coefficients.len() {
            return Err(BaselineError::MismatchedLengths {
                column: "features".to_string(),
                expected: self.coefficients.len(),
                got: columns.len(),
            });
        }

        let n = columns.first().map_or(0, Vec::len);
        let mut out = vec![self.intercept; n];
        for (j, (col, &coef)) in columns.iter().zip(&self.coefficients).enumerate() {
            if col.len() != n {
                return Err(BaselineError::MismatchedLengths {
                    column: format!("feature[{j}]"),
                    expected: n,
                    got: col.len(),
                });
            }
            for (o, &x) in out.iter_mut().zip(col) {
                *o += coef * x;
            }
        }
        Ok(out)
    }

    /// Lowest cross-validation score on the grid.
    pub fn best_cv_score(&self) -> Option<f64> {
        self.cv_scores
            .iter()
            .copied()
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Equal))
    }
}

// ============================================================================
// Estimator
// ============================================================================

/// Ridge regression with the penalty chosen by leave-one-out CV.
#[derive(Debug, Clone, PartialEq)]
pub struct RidgeCV {
    alphas: Vec<f64>,
}

impl Default for RidgeCV {
    fn default() -> Self {
        Self::new(logspace(
            Self::DEFAULT_LOG_START,
            Self::DEFAULT_LOG_STOP,
            Self::DEFAULT_GRID_SIZE,
        ))
    }
}

impl RidgeCV {
    // ========================================================================
    // Constants
    // ========================================================================

    /// Base-10 exponent of the smallest default alpha.
    pub const DEFAULT_LOG_START: f64 = -3.0;

    /// Base-10 exponent of the largest default alpha.
    pub const DEFAULT_LOG_STOP: f64 = 3.0;

    /// Number of alphas in the default grid.
    pub const DEFAULT_GRID_SIZE: usize = 50;

    /// Leverages this close to 1 make the LOO residual unbounded.
    const MIN_LOO_DENOMINATOR: f64 = 1e-12;

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create an estimator over an explicit alpha grid.
    pub fn new(alphas: Vec<f64>) -> Self {
        Self { alphas }
    }

    /// Candidate penalty strengths.
    pub fn alphas(&self) -> &[f64] {
        &self.alphas
    }

    // ========================================================================
    // Fitting
    // ========================================================================

    /// Fit on column-major features (`columns[j][i]` is feature `j`, row `i`).
    pub fn fit(&self, columns: &[Vec<f64>], y: &[f64]) -> Result<RidgeFit, BaselineError> {
        let n = y.len();
        let p = columns.len();

        if p == 0 {
            return Err(BaselineError::NoFeatures);
        }
        if n < 2 {
            return Err(BaselineError::TooFewPoints { got: n, min: 2 });
        }
        if self.alphas.is_empty() {
            return Err(BaselineError::InvalidAlphas("grid is empty".to_string()));
        }
        for (j, col) in columns.iter().enumerate() {
            if col.len() != n {
                return Err(BaselineError::MismatchedLengths {
                    column: format!("feature[{j}]"),
                    expected: n,
                    got: col.len(),
                });
            }
        }

        let prepared = center_and_normalize(columns, y);
        let gram = prepared.design.transpose() * &prepared.design;
        let eigen = SymmetricEigen::new(gram);

        // Rotate the problem into the eigenbasis once.
        let q = &prepared.design * &eigen.eigenvectors;
        let qty = q.transpose() * &prepared.y_centered;
        let lambdas: Vec<f64> = eigen.eigenvalues.iter().map(|l| l.max(0.0)).collect();

        let n_inv = 1.0 / n as f64;
        let cv_scores: Vec<f64> = self
            .alphas
            .iter()
            .map(|&alpha| {
                let mut total = 0.0;
                for i in 0..n {
                    let mut fitted = 0.0;
                    let mut leverage = n_inv;
                    for k in 0..p {
                        let shrink = 1.0 / (lambdas[k] + alpha);
                        let qik = q[(i, k)];
                        fitted += qik * qty[k] * shrink;
                        leverage += qik * qik * shrink;
                    }
                    let denom = 1.0 - leverage;
                    if denom <= Self::MIN_LOO_DENOMINATOR {
                        return f64::INFINITY;
                    }
                    let loo = (prepared.y_centered[i] - fitted) / denom;
                    total += loo * loo;
                }
                total * n_inv
            })
            .collect();

        let best = cv_scores
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Equal))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let alpha = self.alphas[best];

        // β = V diag(1 / (λ + α)) Vᵀ Xᵀ y on the normalized scale.
        let mut coefficients = vec![0.0; p];
        for (j, coef) in coefficients.iter_mut().enumerate() {
            let normalized: f64 = (0..p)
                .map(|k| eigen.eigenvectors[(j, k)] * qty[k] / (lambdas[k] + alpha))
                .sum();
            *coef = normalized / prepared.x_scale[j];
        }

        let intercept = prepared.y_offset
            - prepared
                .x_offset
                .iter()
                .zip(&coefficients)
                .map(|(m, c)| m * c)
                .sum::<f64>();

        Ok(RidgeFit {
            coefficients,
            intercept,
            alpha,
            cv_scores,
        })
    }
}

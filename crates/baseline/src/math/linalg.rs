//! Design-matrix preparation for penalized least squares.
//!
//! Features are centered and divided by the L2 norm of the centered column
//! before the penalty is applied, so a single alpha grid is meaningful
//! regardless of the engineering units of each sensor. The target is only
//! centered; the intercept is recovered afterwards and never penalized.

// External dependencies
use nalgebra::{DMatrix, DVector};

// Internal dependencies
use crate::math::stats::mean;

/// Centered and normalized regression problem.
#[derive(Debug, Clone)]
pub struct Standardized {
    /// Normalized design matrix, `n × p`.
    pub design: DMatrix<f64>,

    /// Column means of the raw features.
    pub x_offset: Vec<f64>,

    /// L2 norms of the centered feature columns (1.0 for constant columns).
    pub x_scale: Vec<f64>,

    /// Mean of the raw target.
    pub y_offset: f64,

    /// Centered target.
    pub y_centered: DVector<f64>,
}

/// Center every feature column and divide it by its centered L2 norm.
///
/// `columns` holds one vector per feature, all of length `y.len()`.
pub fn center_and_normalize(columns: &[Vec<f64>], y: &[f64]) -> Standardized {
    let n = y.len();
    let p = columns.len();

    let mut x_offset = Vec::with_capacity(p);
    let mut x_scale = Vec::with_capacity(p);
    let mut design = DMatrix::<f64>::zeros(n, p);

    for (j, col) in columns.iter().enumerate() {
        let m = mean(col);
        let norm = col.iter().map(|v| (v - m) * (v - m)).sum::<f64>().sqrt();
        let scale = if norm > 0.0 && norm.is_finite() {
            norm
        } else {
            1.0
        };
        for (i, v) in col.iter().enumerate() {
            design[(i, j)] = (v - m) / scale;
        }
        x_offset.push(m);
        x_scale.push(scale);
    }

    let y_offset = mean(y);
    let y_centered = DVector::from_iterator(n, y.iter().map(|v| v - y_offset));

    Standardized {
        design,
        x_offset,
        x_scale,
        y_offset,
        y_centered,
    }
}

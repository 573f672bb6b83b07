//! Ordinary least-squares line fit.
//!
//! Centered sums: `slope = Sxy / Sxx`, `intercept = ȳ - slope · x̄`.

// External dependencies
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::errors::RegSimError;
use crate::generator::Dataset;

/// Fitted line `y = slope · x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineFit {
    /// Slope.
    pub slope: f64,

    /// Intercept.
    pub intercept: f64,
}

impl LineFit {
    /// Evaluate the line at `x`.
    #[inline]
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line to a dataset by ordinary least squares.
pub fn fit_line(data: &Dataset) -> Result<LineFit, RegSimError> {
    fit_xy(&data.x, &data.y)
}

/// Fit a line to paired slices by ordinary least squares.
pub fn fit_xy(x: &[f64], y: &[f64]) -> Result<LineFit, RegSimError> {
    let n = x.len().min(y.len());
    if n < 2 {
        return Err(RegSimError::TooFewPoints { got: n, min: 2 });
    }

    let n_f = n as f64;
    let x_mean = x[..n].iter().sum::<f64>() / n_f;
    let y_mean = y[..n].iter().sum::<f64>() / n_f;

    let (sxx, sxy) = x[..n]
        .iter()
        .zip(&y[..n])
        .fold((0.0, 0.0), |(sxx, sxy), (&xi, &yi)| {
            let dx = xi - x_mean;
            (sxx + dx * dx, sxy + dx * (yi - y_mean))
        });

    if sxx <= 0.0 {
        return Err(RegSimError::DegenerateInput);
    }

    let slope = sxy / sxx;
    Ok(LineFit {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}

//! Synthetic one-feature regression data.
//!
//! ## Key concepts
//!
//! * `x ~ N(0, 1)`
//! * `coef = 100 · U(0, 1)`, drawn once per dataset
//! * `y = coef · x + bias + noise · N(0, 1)`
//!
//! Draws happen in that order, so a seeded generator reproduces a dataset
//! exactly.

// External dependencies
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use tracing::debug;

// Internal dependencies
use crate::controls::SimulationParams;

/// Scale of the ground-truth coefficient.
const COEF_SCALE: f64 = 100.0;

/// One generated dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Feature values.
    pub x: Vec<f64>,

    /// Target values.
    pub y: Vec<f64>,

    /// Coefficient used to generate `y`.
    pub coef: f64,
}

impl Dataset {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Generate `params.n_samples` rows.
pub fn create_data<R: Rng + ?Sized>(params: &SimulationParams, rng: &mut R) -> Dataset {
    let x: Vec<f64> = (0..params.n_samples)
        .map(|_| StandardNormal.sample(rng))
        .collect();
    let uniform: f64 = StandardUniform.sample(rng);
    let coef = COEF_SCALE * uniform;

    let y = x
        .iter()
        .map(|&xi| {
            let eps: f64 = StandardNormal.sample(rng);
            coef * xi + params.bias + params.noise * eps
        })
        .collect();

    debug!(
        n_samples = params.n_samples,
        bias = params.bias,
        noise = params.noise,
        coef,
        "dataset generated"
    );
    Dataset { x, y, coef }
}

//! Slider ranges and simulation parameters.
//!
//! ## Purpose
//!
//! This module holds the three simulator controls and the parameter set
//! they produce. Ranges are fixed; a value is accepted only if it is one of
//! the positions the slider can reach.
//!
//! ## Key concepts
//!
//! * **Samples**: 100 by default; 50..=500 in steps of 50.
//! * **Bias**: 0 by default; -50..=50 in steps of 5.
//! * **Noise**: 3 by default; 0..=20 in steps of 1.

// External dependencies
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::errors::RegSimError;

/// Tolerance when snapping a value to the step grid.
const STEP_TOLERANCE: f64 = 1e-9;

// ============================================================================
// Slider Range
// ============================================================================

/// Default value and admissible positions of one slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    /// Initial position.
    pub default: f64,

    /// Lowest position, inclusive.
    pub start: f64,

    /// Highest position, inclusive.
    pub end: f64,

    /// Distance between positions.
    pub step: f64,
}

impl SliderRange {
    /// Number of samples to generate.
    pub const SAMPLES: SliderRange = SliderRange {
        default: 100.0,
        start: 50.0,
        end: 500.0,
        step: 50.0,
    };

    /// Constant added to every target value.
    pub const BIAS: SliderRange = SliderRange {
        default: 0.0,
        start: -50.0,
        end: 50.0,
        step: 5.0,
    };

    /// Standard deviation of the Gaussian noise on the target.
    pub const NOISE: SliderRange = SliderRange {
        default: 3.0,
        start: 0.0,
        end: 20.0,
        step: 1.0,
    };

    /// True if `value` is a reachable slider position.
    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() || value < self.start || value > self.end {
            return false;
        }
        let steps = (value - self.start) / self.step;
        (steps - steps.round()).abs() <= STEP_TOLERANCE
    }

    /// Return `value` if reachable, otherwise `OutOfRange` naming `control`.
    pub fn check(&self, control: &'static str, value: f64) -> Result<f64, RegSimError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(RegSimError::OutOfRange {
                control,
                value,
                start: self.start,
                end: self.end,
                step: self.step,
            })
        }
    }

    /// Every reachable position, lowest first.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        let count = ((self.end - self.start) / self.step).round() as usize + 1;
        (0..count).map(move |i| self.start + self.step * i as f64)
    }
}

// ============================================================================
// Simulation Parameters
// ============================================================================

/// Control values used to generate one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Number of rows.
    pub n_samples: usize,

    /// Constant added to every target value.
    pub bias: f64,

    /// Standard deviation of the target noise.
    pub noise: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            n_samples: SliderRange::SAMPLES.default as usize,
            bias: SliderRange::BIAS.default,
            noise: SliderRange::NOISE.default,
        }
    }
}

impl SimulationParams {
    /// Check every value against its slider.
    pub fn validate(&self) -> Result<(), RegSimError> {
        SliderRange::SAMPLES.check("samples", self.n_samples as f64)?;
        SliderRange::BIAS.check("bias", self.bias)?;
        SliderRange::NOISE.check("noise", self.noise)?;
        Ok(())
    }
}

//! Event-driven simulator state.
//!
//! ## Purpose
//!
//! This module is the controller behind the simulator chart. Control events
//! come in one at a time; each either updates a stored control value,
//! regenerates and refits the data, or clears the scatter.
//!
//! ## Design notes
//!
//! * **Deferred generation**: Slider events only store the value. Data is
//!   regenerated on `Simulate`.
//! * **Whole replacement**: `Simulate` replaces both sources and both ranges
//!   together; there are no partial updates.
//! * **Reproducible**: The generator is seeded, so a seed and an event
//!   sequence determine every dataset.
//!
//! ## Invariants
//!
//! * After `Simulate`, the point source has exactly `n_samples` rows.
//! * The line source always has two points, at the x range ends.
//! * `Clear` empties the point source and leaves the line and ranges alone.

// External dependencies
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// Internal dependencies
use crate::controls::{SimulationParams, SliderRange};
use crate::errors::RegSimError;
use crate::fit::{LineFit, fit_line};
use crate::generator::create_data;
use crate::source::{ColumnSource, Range1d};

// ============================================================================
// Events
// ============================================================================

/// A control interaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Number-of-samples slider moved.
    SetSamples(usize),
    /// Bias slider moved.
    SetBias(f64),
    /// Noise slider moved.
    SetNoise(f64),
    /// "Simulate" button pressed.
    Simulate,
    /// "Clear" button pressed.
    Clear,
}

// ============================================================================
// Simulator
// ============================================================================

/// Simulator state: controls, generator and chart sources.
#[derive(Debug, Clone)]
pub struct Simulator {
    params: SimulationParams,
    rng: StdRng,
    data_source: ColumnSource,
    line_source: ColumnSource,
    x_range: Range1d,
    y_range: Range1d,
    fit: LineFit,
    coef: f64,
}

impl Simulator {
    /// Start from the default controls and generate the first dataset.
    pub fn new(seed: u64) -> Result<Self, RegSimError> {
        Self::with_params(seed, SimulationParams::default())
    }

    /// Start from the given controls and generate the first dataset.
    pub fn with_params(seed: u64, params: SimulationParams) -> Result<Self, RegSimError> {
        params.validate()?;
        let mut sim = Self {
            params,
            rng: StdRng::seed_from_u64(seed),
            data_source: ColumnSource::default(),
            line_source: ColumnSource::default(),
            x_range: Range1d::default(),
            y_range: Range1d::default(),
            fit: LineFit {
                slope: 0.0,
                intercept: 0.0,
            },
            coef: 0.0,
        };
        sim.simulate()?;
        Ok(sim)
    }

    /// Apply one event.
    pub fn handle(&mut self, event: Event) -> Result<(), RegSimError> {
        debug!(?event, "event received");
        match event {
            Event::SetSamples(n) => {
                SliderRange::SAMPLES.check("samples", n as f64)?;
                self.params.n_samples = n;
            }
            Event::SetBias(bias) => {
                self.params.bias = SliderRange::BIAS.check("bias", bias)?;
            }
            Event::SetNoise(noise) => {
                self.params.noise = SliderRange::NOISE.check("noise", noise)?;
            }
            Event::Simulate => self.simulate()?,
            Event::Clear => self.data_source.clear(),
        }
        Ok(())
    }

    fn simulate(&mut self) -> Result<(), RegSimError> {
        let data = create_data(&self.params, &mut self.rng);
        let fit = fit_line(&data)?;

        let x_range = Range1d::spanning(&data.x).ok_or(RegSimError::TooFewPoints {
            got: data.len(),
            min: 2,
        })?;
        let y_range = Range1d::spanning(&data.y).ok_or(RegSimError::TooFewPoints {
            got: data.len(),
            min: 2,
        })?;

        info!(
            n_samples = data.len(),
            coef = data.coef,
            slope = fit.slope,
            intercept = fit.intercept,
            "line refit"
        );

        self.line_source = ColumnSource::new(
            vec![x_range.start, x_range.end],
            vec![fit.at(x_range.start), fit.at(x_range.end)],
        );
        self.coef = data.coef;
        self.data_source = ColumnSource::new(data.x, data.y);
        self.x_range = x_range;
        self.y_range = y_range;
        self.fit = fit;
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current control values.
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Scatter points.
    pub fn data_source(&self) -> &ColumnSource {
        &self.data_source
    }

    /// Fitted line endpoints.
    pub fn line_source(&self) -> &ColumnSource {
        &self.line_source
    }

    /// Horizontal axis extent.
    pub fn x_range(&self) -> Range1d {
        self.x_range
    }

    /// Vertical axis extent.
    pub fn y_range(&self) -> Range1d {
        self.y_range
    }

    /// Most recent line fit.
    pub fn line_fit(&self) -> LineFit {
        self.fit
    }

    /// Ground-truth coefficient of the most recent dataset.
    pub fn true_coef(&self) -> f64 {
        self.coef
    }
}

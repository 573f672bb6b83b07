//! # baseline: Ridge-Regression Baselines for Equipment Sensors
//!
//! Fits a cross-validated ridge regression of one sensor reading (the
//! target) on a primary feature and any number of secondary features, then
//! derives everything needed to monitor the equipment against that
//! baseline: residuals, a corrected target with the secondary effects
//! removed, readable equations, accuracy metrics, warning/alarm limits and
//! an eight-panel diagnostic figure.
//!
//! ## Quick Start
//!
//! ```rust
//! use baseline::prelude::*;
//!
//! let power: Vec<f64> = (0..40).map(|i| 10.0 + i as f64).collect();
//! let temp: Vec<f64> = (0..40).map(|i| 15.0 + (i % 7) as f64).collect();
//! let fuel: Vec<f64> = power
//!     .iter()
//!     .zip(&temp)
//!     .enumerate()
//!     .map(|(i, (p, t))| 2.0 * p + 0.5 * t + 3.0 + 0.01 * ((i * 37 % 11) as f64 - 5.0))
//!     .collect();
//!
//! let frame = Frame::new()
//!     .with_column("Fuel Rate", fuel)?
//!     .with_column("Shaft Power", power)?
//!     .with_column("Sea Temp", temp)?;
//!
//! let mut pipeline = Baseline::new()
//!     .unit("Aurora")
//!     .equipment("ME1")
//!     .target("Fuel Rate")
//!     .features(["Shaft Power", "Sea Temp"])
//!     .build()?;
//!
//! pipeline.fit(&frame, &frame)?;
//!
//! let model = pipeline.model();
//! if let (Some(equation), Some(metrics)) = (model.equation(), model.metrics()) {
//!     println!("{equation}");
//!     println!("{metrics}");
//! }
//! # Result::<(), BaselineError>::Ok(())
//! ```
//!
//! ```text
//! Value=2.000*ShaftPower + 0.5000*SeaTemp + 3.000
//! Baseline Metrics:
//!   R²:                 1
//!   MAE:                ...
//!   Explained variance: 1
//!   Warning limit:      ±...
//!   Alarm limit:        ±...
//! ```
//!
//! ## Pipeline
//!
//! The pipeline runs in fixed stages, each timed and logged through
//! `tracing`:
//!
//! 1. **split**: keep the target and feature columns, drop incomplete rows.
//! 2. **fit**: ridge regression, penalty chosen by leave-one-out CV over a
//!    log grid (`10^-3 ..= 10^3`, 50 points by default).
//! 3. **predict**: test-split predictions and residuals.
//! 4. **correct**: target minus the secondary-feature contribution.
//! 5. **equation**: fitted and corrected equation strings.
//! 6. **metrics**: R², MAE, explained variance, `k × sd(residual)` limits.
//! 7. **filter** (optional): rolling-median residual smoothing.
//!
//! Stages can also be driven one at a time through
//! [`BaselinePipeline::model_mut`](crate::prelude::BaselinePipeline::model_mut).
//!
//! ## Features
//!
//! * `plot` (default): SVG rendering of the diagnostic figure with `plotters`.
//! * `dev`: exposes internal layers for benchmarks and tests.

// Layer 1: Primitives - data containers and error types.
mod primitives;

// Layer 2: Math - pure statistical and linear-algebra helpers.
mod math;

// Layer 3: Algorithms - the ridge estimator.
mod algorithms;

// Layer 4: Evaluation - metrics and equations.
mod evaluation;

// Layer 5: Engine - staged pipeline, configuration and validation.
mod engine;

// Layer 6: Plot - diagnostic figure.
mod plot;

// High-level fluent API.
mod api;

// Standard baseline prelude.
pub mod prelude {
    pub use crate::algorithms::ridge::RidgeCV;
    pub use crate::api::{
        Band, BaselineBuilder as Baseline, BaselineError, BaselinePipeline, Metrics, Panel,
        RegressionPlot, RidgeFit, Split, Stage, StageTiming,
    };
    pub use crate::engine::config::{AlphaGrid, BaselineConfig};
    pub use crate::engine::model::{ModelKey, RegressionModel};
    pub use crate::evaluation::equation::{
        corrected_equation, fitted_equation, format_significant, symbol_name,
    };
    pub use crate::evaluation::metrics::{
        explained_variance_score, mean_absolute_error, r2_score, round_to, threshold,
    };
    pub use crate::math::stats::{logspace, median, rolling_median, std_dev};
    pub use crate::plot::{Bar, Histogram, Line, LineKind};
    pub use crate::primitives::frame::{Column, Frame};
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod plot {
        pub use crate::plot::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}

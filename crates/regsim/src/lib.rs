//! # regsim: Linear Regression Simulator
//!
//! The model and controller behind a "Linear Regression Simulator" page:
//! three sliders (number of samples, bias, noise), a **Simulate** button
//! that draws a fresh synthetic dataset and refits a line, and a **Clear**
//! button that empties the scatter. The widget runtime is external; this
//! crate consumes its events and produces the chart sources it draws.
//!
//! ## Quick Start
//!
//! ```rust
//! use regsim::prelude::*;
//!
//! let mut sim = Simulator::new(7)?;
//! sim.handle(Event::SetSamples(250))?;
//! sim.handle(Event::SetNoise(10.0))?;
//! sim.handle(Event::Simulate)?;
//!
//! assert_eq!(sim.data_source().len(), 250);
//! assert_eq!(sim.line_source().len(), 2);
//!
//! sim.handle(Event::Clear)?;
//! assert!(sim.data_source().is_empty());
//! # Result::<(), RegSimError>::Ok(())
//! ```
//!
//! ## Controls
//!
//! | Control | Default | Range      | Step |
//! |---------|---------|------------|------|
//! | Samples | 100     | 50..=500   | 50   |
//! | Bias    | 0       | -50..=50   | 5    |
//! | Noise   | 3       | 0..=20     | 1    |
//!
//! ## Features
//!
//! * `plot` (default): SVG rendering of the chart with `plotters`.

mod controls;
mod errors;
mod fit;
mod generator;
mod session;
mod source;

#[cfg(feature = "plot")]
mod render;

// Standard simulator prelude.
pub mod prelude {
    pub use crate::controls::{SimulationParams, SliderRange};
    pub use crate::errors::RegSimError;
    pub use crate::fit::{LineFit, fit_line, fit_xy};
    pub use crate::generator::{Dataset, create_data};
    pub use crate::session::{Event, Simulator};
    pub use crate::source::{ColumnSource, Range1d};
}

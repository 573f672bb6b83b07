//! Layer 6: Plot
//!
//! # Purpose
//!
//! This layer presents a scored baseline as a fixed 2×4 diagnostic figure:
//! residuals against index and the primary feature, predicted against
//! actual, actual and corrected targets against the primary feature, and
//! density histograms of residuals, actual and corrected targets.
//!
//! Panel construction is always available; drawing to SVG requires the
//! `plot` feature.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API / Plot ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Density histograms.
pub mod histogram;

/// Panel descriptions and the figure title.
pub mod panels;

/// SVG rendering.
#[cfg(feature = "plot")]
pub mod render;

pub use histogram::{Bar, Histogram};
pub use panels::{Line, LineKind, Panel, RegressionPlot};

//! Error types for the regression simulator.
//!
//! ## Purpose
//!
//! This module defines the error conditions raised while handling control
//! events, generating data, fitting the line and drawing the chart.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending value and the accepted range.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error`.
//!
//! ## Non-goals
//!
//! * This module does not clamp or snap out-of-range control values.

// External dependencies
use std::error::Error;
use std::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for simulator operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RegSimError {
    /// A control value is outside its slider range or off its step grid.
    OutOfRange {
        /// Control name.
        control: &'static str,
        /// Value provided.
        value: f64,
        /// Lower bound, inclusive.
        start: f64,
        /// Upper bound, inclusive.
        end: f64,
        /// Step between admissible values.
        step: f64,
    },

    /// Too few samples to fit a line.
    TooFewPoints {
        /// Number of samples provided.
        got: usize,
        /// Minimum required samples.
        min: usize,
    },

    /// All x values are identical, so the slope is undefined.
    DegenerateInput,

    /// The chart could not be drawn or written.
    Render(String),
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for RegSimError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::OutOfRange {
                control,
                value,
                start,
                end,
                step,
            } => write!(
                f,
                "{control} = {value} is not in {start}..={end} with step {step}"
            ),
            Self::TooFewPoints { got, min } => {
                write!(f, "Too few points: got {got}, need at least {min}")
            }
            Self::DegenerateInput => write!(f, "All x values are identical"),
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for RegSimError {}

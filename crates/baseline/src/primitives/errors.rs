//! Error types for baseline modelling operations.
//!
//! ## Purpose
//!
//! This module defines error conditions that can occur while building a
//! regression baseline, including input validation, parameter constraints,
//! pipeline ordering and figure rendering.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. expected lengths).
//! * **Deferred**: Builder misuse is recorded and reported when `.build()` is called.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error`.
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty splits, missing columns, mismatched lengths, non-finite values.
//! 2. **Parameter validation**: Alpha grid, multipliers, smoothing window, precision.
//! 3. **Pipeline ordering**: A stage was called before the stage it depends on.
//! 4. **Collaborators**: Configuration parsing and figure rendering failures.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// External dependencies
use std::error::Error;
use std::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for baseline operations.
#[derive(Debug, Clone, PartialEq)]
pub enum BaselineError {
    /// A data split has no complete rows after missing values were dropped.
    EmptyInput {
        /// Which split was empty ("train" or "test").
        split: &'static str,
    },

    /// A requested column label is not present in the frame.
    MissingColumn(String),

    /// A column label appears more than once.
    DuplicateColumn(String),

    /// A column does not have the expected number of rows.
    MismatchedLengths {
        /// Label of the offending column.
        column: String,
        /// Expected number of rows.
        expected: usize,
        /// Number of rows provided.
        got: usize,
    },

    /// At least one feature label is required; the first is the primary feature.
    NoFeatures,

    /// Number of rows is below the minimum requirement for the operation.
    TooFewPoints {
        /// Number of rows provided.
        got: usize,
        /// Minimum required rows.
        min: usize,
    },

    /// Regularization grid is empty or contains a non-positive value.
    InvalidAlphas(String),

    /// Threshold multipliers must be finite and non-negative.
    InvalidMultiplier {
        /// Name of the multiplier.
        name: &'static str,
        /// Value provided.
        value: f64,
    },

    /// Rolling median window must be at least 1.
    InvalidWindow(usize),

    /// Significant-digit precision must be at least 1.
    InvalidDigits(u32),

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// A pipeline stage was invoked before its prerequisite stage.
    StageOrder {
        /// Stage that was invoked.
        stage: &'static str,
        /// Stage that must run first.
        requires: &'static str,
    },

    /// A required builder parameter was never set.
    MissingParameter {
        /// Name of the parameter.
        parameter: &'static str,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },

    /// Configuration could not be read or parsed.
    Config(String),

    /// The figure could not be drawn or written.
    Render(String),
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for BaselineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput { split } => {
                write!(f, "The {split} split has no complete rows")
            }
            Self::MissingColumn(label) => write!(f, "Missing column: '{label}'"),
            Self::DuplicateColumn(label) => write!(f, "Duplicate column: '{label}'"),
            Self::MismatchedLengths {
                column,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Length mismatch: column '{column}' has {got} rows, expected {expected}"
                )
            }
            Self::NoFeatures => write!(f, "At least one feature label is required"),
            Self::TooFewPoints { got, min } => {
                write!(f, "Too few points: got {got}, need at least {min}")
            }
            Self::InvalidAlphas(msg) => write!(f, "Invalid alpha grid: {msg}"),
            Self::InvalidMultiplier { name, value } => {
                write!(f, "Invalid {name} multiplier: {value} (must be >= 0 and finite)")
            }
            Self::InvalidWindow(window) => {
                write!(f, "Invalid median window: {window} (must be >= 1)")
            }
            Self::InvalidDigits(digits) => {
                write!(f, "Invalid precision: {digits} significant digits (must be >= 1)")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::StageOrder { stage, requires } => {
                write!(f, "Stage '{stage}' requires '{requires}' to run first")
            }
            Self::MissingParameter { parameter } => {
                write!(f, "Parameter '{parameter}' must be set before building")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for BaselineError {}

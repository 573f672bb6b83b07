//! Column-oriented tabular data with named columns.
//!
//! ## Purpose
//!
//! This module provides [`Frame`], the in-memory table that feeds the
//! regression pipeline. Sensor exports are wide tables keyed by label, and
//! the pipeline only ever needs a handful of those columns with incomplete
//! rows removed.
//!
//! ## Design notes
//!
//! * **Missing values**: A missing reading is stored as `NaN`. In JSON it is `null`.
//! * **Ordering**: Columns keep insertion order; lookups are by label.
//! * **Selection**: [`Frame::select_complete`] projects and drops incomplete rows in one pass.
//!
//! ## Invariants
//!
//! * Every column has the same number of rows.
//! * Column labels are unique.

// External dependencies
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Internal dependencies
use crate::primitives::errors::BaselineError;

// ============================================================================
// Column
// ============================================================================

/// A single named column of readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column label, e.g. `"Shaft Power"`.
    pub label: String,

    /// Readings; `NaN` marks a missing value.
    #[serde(serialize_with = "nullable::serialize")]
    #[serde(deserialize_with = "nullable::deserialize")]
    pub values: Vec<f64>,
}

// ============================================================================
// Frame
// ============================================================================

/// Ordered collection of equal-length named columns.
///
/// Serializes as a JSON array of `{"label": ..., "values": [...]}` objects;
/// deserialization enforces the frame invariants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Column>", into = "Vec<Column>")]
pub struct Frame {
    columns: Vec<Column>,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from `(label, values)` pairs.
    pub fn from_columns<I, S>(columns: I) -> Result<Self, BaselineError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut frame = Self::new();
        for (label, values) in columns {
            frame.push_column(label, values)?;
        }
        Ok(frame)
    }

    /// Add a column, consuming and returning the frame.
    pub fn with_column(
        mut self,
        label: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, BaselineError> {
        self.push_column(label, values)?;
        Ok(self)
    }

    /// Append a column in place.
    pub fn push_column(
        &mut self,
        label: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), BaselineError> {
        let label = label.into();
        if self.columns.iter().any(|c| c.label == label) {
            return Err(BaselineError::DuplicateColumn(label));
        }
        if let Some(first) = self.columns.first() {
            if first.values.len() != values.len() {
                return Err(BaselineError::MismatchedLengths {
                    column: label,
                    expected: first.values.len(),
                    got: values.len(),
                });
            }
        }
        self.columns.push(Column { label, values });
        Ok(())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// True if the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Column labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.label.as_str())
    }

    /// Look up a column by label.
    pub fn column(&self, label: &str) -> Result<&[f64], BaselineError> {
        self.columns
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| BaselineError::MissingColumn(label.to_string()))
    }

    /// Project onto `labels` and drop every row where any selected value is
    /// missing or non-finite.
    ///
    /// The returned frame holds the selected columns in the order requested.
    pub fn select_complete<S: AsRef<str>>(&self, labels: &[S]) -> Result<Frame, BaselineError> {
        let selected = labels
            .iter()
            .map(|l| self.column(l.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let keep: Vec<usize> = (0..self.len())
            .filter(|&row| selected.iter().all(|col| col[row].is_finite()))
            .collect();

        let mut out = Frame::new();
        for (label, values) in labels.iter().zip(selected) {
            out.push_column(
                label.as_ref(),
                keep.iter().map(|&row| values[row]).collect(),
            )?;
        }
        Ok(out)
    }
}

impl TryFrom<Vec<Column>> for Frame {
    type Error = BaselineError;

    fn try_from(columns: Vec<Column>) -> Result<Self, Self::Error> {
        Self::from_columns(columns.into_iter().map(|c| (c.label, c.values)))
    }
}

impl From<Frame> for Vec<Column> {
    fn from(frame: Frame) -> Self {
        frame.columns
    }
}

// ============================================================================
// Serde helpers
// ============================================================================

mod nullable {
    use super::*;

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        let mapped: Vec<Option<f64>> = values
            .iter()
            .map(|v| if v.is_finite() { Some(*v) } else { None })
            .collect();
        mapped.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let raw: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}

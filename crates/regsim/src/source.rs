//! Chart data sources and axis ranges.
//!
//! A [`ColumnSource`] is the point or line data a chart draws; a
//! [`Range1d`] is one axis extent. The simulator replaces both wholesale on
//! every update.

// External dependencies
use serde::{Deserialize, Serialize};

/// Paired `x`/`y` columns drawn by one glyph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnSource {
    /// Horizontal coordinates.
    pub x: Vec<f64>,

    /// Vertical coordinates.
    pub y: Vec<f64>,
}

impl ColumnSource {
    /// Source from paired columns.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    /// True if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every row.
    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
    }

    /// Rows as `(x, y)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Axis extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Range1d {
    /// Lower end.
    pub start: f64,

    /// Upper end.
    pub end: f64,
}

impl Range1d {
    /// Range spanning the finite values of `values`, or `None` if there are none.
    pub fn spanning(values: &[f64]) -> Option<Self> {
        values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some(Self { start: v, end: v }),
                Some(r) => Some(Self {
                    start: r.start.min(v),
                    end: r.end.max(v),
                }),
            })
    }

    /// `end - start`.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

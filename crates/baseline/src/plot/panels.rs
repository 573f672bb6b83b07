//! Panel layout of the diagnostic figure.
//!
//! ## Purpose
//!
//! This module turns a scored [`RegressionModel`] into eight backend-neutral
//! panel descriptions laid out on a 2×4 grid:
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────┬──────────────┐
//! │ resid/index  │ resid/prim   │ pred/actual  │ hist resid   │
//! ├──────────────┼──────────────┼──────────────┼──────────────┤
//! │ actual/prim  │ corr/prim    │ hist actual  │ hist corr    │
//! └──────────────┴──────────────┴──────────────┴──────────────┘
//! ```
//!
//! ## Design notes
//!
//! * **Borrowed data**: The plot borrows the model's series; nothing is copied
//!   until panels are built.
//! * **Backend-neutral**: Panels carry points, bars, curves, reference lines
//!   and annotation text in data coordinates. Rendering lives in `render`.
//!
//! ## Invariants
//!
//! * Residual panels carry five limit lines spanning the panel's x extent:
//!   zero, ±warning and ±alarm.
//! * The predicted-vs-actual panel has identical x and y ranges.

// External dependencies
use core::fmt::Write;

// Internal dependencies
use crate::engine::model::{RegressionModel, Stage};
use crate::evaluation::equation::symbol_name;
use crate::evaluation::metrics::Metrics;
use crate::math::stats::min_max;
use crate::plot::histogram::{Bar, Histogram};
use crate::primitives::errors::BaselineError;

// ============================================================================
// Panel Description
// ============================================================================

/// Role of a reference line; the renderer picks its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Zero residual.
    Zero,
    /// ±warning limit.
    Warning,
    /// ±alarm limit.
    Alarm,
    /// `y = x` reference.
    Diagonal,
}

/// Straight reference line between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Start point.
    pub from: (f64, f64),

    /// End point.
    pub to: (f64, f64),

    /// What the line marks.
    pub kind: LineKind,
}

/// One chart of the diagnostic grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panel {
    /// Chart caption.
    pub title: String,

    /// Horizontal axis label.
    pub x_label: String,

    /// Vertical axis label.
    pub y_label: String,

    /// Horizontal axis extent.
    pub x_range: (f64, f64),

    /// Vertical axis extent.
    pub y_range: (f64, f64),

    /// Scatter points.
    pub points: Vec<(f64, f64)>,

    /// Histogram bars.
    pub bars: Vec<Bar>,

    /// Fitted density curve.
    pub curve: Vec<(f64, f64)>,

    /// Reference lines.
    pub lines: Vec<Line>,

    /// Text box lines shown in the upper-left corner.
    pub annotation: Vec<String>,
}

// ============================================================================
// Regression Plot
// ============================================================================

/// Diagnostic figure for a scored model.
#[derive(Debug, Clone, Copy)]
pub struct RegressionPlot<'a> {
    model: &'a RegressionModel,
    metrics: &'a Metrics,
    primary: &'a [f64],
    y_test: &'a [f64],
    y_predicts: &'a [f64],
    y_resids: &'a [f64],
    y_corrected: &'a [f64],
    equation: &'a str,
}

impl<'a> RegressionPlot<'a> {
    /// Number of panels in the grid.
    pub const PANELS: usize = 8;

    /// Grid shape, rows by columns.
    pub const GRID: (usize, usize) = (2, 4);

    /// Borrow a model that has run through predict, correct, equation and
    /// metrics.
    pub fn new(model: &'a RegressionModel) -> Result<Self, BaselineError> {
        let missing = |requires: Stage| BaselineError::StageOrder {
            stage: "plot",
            requires: requires.name(),
        };

        Ok(Self {
            model,
            metrics: model.metrics().ok_or_else(|| missing(Stage::Metrics))?,
            primary: model.primary_test().ok_or_else(|| missing(Stage::Split))?,
            y_test: model.y_test().ok_or_else(|| missing(Stage::Split))?,
            y_predicts: model.y_predicts().ok_or_else(|| missing(Stage::Predict))?,
            y_resids: model.y_resids().ok_or_else(|| missing(Stage::Predict))?,
            y_corrected: model.y_corrected().ok_or_else(|| missing(Stage::Correct))?,
            equation: model.equation().ok_or_else(|| missing(Stage::Equation))?,
        })
    }

    /// `BL_{unit}_{equipment}_{Target}(R{r2})vs['f1','f2']`.
    ///
    /// The unit segment is omitted when the unit is empty.
    pub fn title(&self) -> String {
        let key = self.model.key();
        let mut title = String::from("BL_");
        if !key.unit.is_empty() {
            let _ = write!(title, "{}_", key.unit);
        }

        let mut features = key
            .features
            .iter()
            .map(|f| format!("'{f}'"))
            .collect::<Vec<_>>()
            .join(",");
        features.retain(|c| c != ' ');
        let _ = write!(
            title,
            "{}_{}(R{:.4})vs[{}]",
            key.equipment,
            symbol_name(&key.target),
            self.metrics.r_squared,
            features
        );
        title
    }

    /// Fitted equation shown under the title.
    pub fn subtitle(&self) -> &str {
        self.equation
    }

    /// Build the eight panels in grid order.
    pub fn panels(&self) -> [Panel; 8] {
        let key = self.model.key();
        let primary = key.primary();
        let target = key.target.as_str();
        let index: Vec<f64> = (0..self.y_resids.len()).map(|i| i as f64).collect();

        [
            self.residual_panel(&index, "Index"),
            self.residual_panel(self.primary, primary),
            self.prediction_panel(target),
            histogram_panel(self.y_resids, "Residuals"),
            scatter_panel(self.primary, self.y_test, primary, target, "Actual"),
            scatter_panel(self.primary, self.y_corrected, primary, target, "Corrected"),
            histogram_panel(self.y_test, &format!("Actual {target}")),
            histogram_panel(self.y_corrected, &format!("Corrected {target}")),
        ]
    }

    // ========================================================================
    // Panel Builders
    // ========================================================================

    fn residual_panel(&self, x: &[f64], x_label: &str) -> Panel {
        let (x_min, x_max) = finite_extent(x).unwrap_or((0.0, 1.0));
        let warn = self.metrics.warning_limit;
        let alarm = self.metrics.alarm_limit;

        let lines = [
            (0.0, LineKind::Zero),
            (warn, LineKind::Warning),
            (-warn, LineKind::Warning),
            (alarm, LineKind::Alarm),
            (-alarm, LineKind::Alarm),
        ]
        .into_iter()
        .map(|(y, kind)| Line {
            from: (x_min, y),
            to: (x_max, y),
            kind,
        })
        .collect();

        let (y_min, y_max) = finite_extent(self.y_resids).unwrap_or((0.0, 0.0));
        let y_range = padded(y_min.min(-alarm), y_max.max(alarm));

        Panel {
            title: format!("Residuals vs. {x_label}"),
            x_label: x_label.to_string(),
            y_label: "Residual Value".to_string(),
            x_range: padded(x_min, x_max),
            y_range,
            points: zip_points(x, self.y_resids),
            lines,
            ..Panel::default()
        }
    }

    fn prediction_panel(&self, target: &str) -> Panel {
        let (a_min, a_max) = finite_extent(self.y_test).unwrap_or((0.0, 1.0));
        let (p_min, p_max) = finite_extent(self.y_predicts).unwrap_or((a_min, a_max));
        let (lo, hi) = (a_min.min(p_min), a_max.max(p_max));
        let bounds = if hi > lo { (lo, hi) } else { padded(lo, hi) };

        Panel {
            title: format!("Predicted {target} vs. Actual {target}"),
            x_label: format!("Actual {target}"),
            y_label: format!("Predicted {target}"),
            x_range: bounds,
            y_range: bounds,
            points: zip_points(self.y_test, self.y_predicts),
            lines: vec![Line {
                from: (bounds.0, bounds.0),
                to: (bounds.1, bounds.1),
                kind: LineKind::Diagonal,
            }],
            annotation: vec![
                format!("MAE={:.3}", self.metrics.mean_abs_error),
                format!("R2={:.3}", self.metrics.r_squared),
            ],
            ..Panel::default()
        }
    }
}

fn scatter_panel(x: &[f64], y: &[f64], x_label: &str, y_label: &str, kind: &str) -> Panel {
    let (x_min, x_max) = finite_extent(x).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = finite_extent(y).unwrap_or((0.0, 1.0));

    Panel {
        title: format!("{kind} {y_label} vs. {x_label}"),
        x_label: x_label.to_string(),
        y_label: format!("{kind} {y_label}"),
        x_range: padded(x_min, x_max),
        y_range: padded(y_min, y_max),
        points: zip_points(x, y),
        ..Panel::default()
    }
}

fn histogram_panel(values: &[f64], label: &str) -> Panel {
    let hist = Histogram::new(values);
    let x_range = hist.x_range().unwrap_or((0.0, 1.0));
    let peak = hist.peak();

    Panel {
        title: format!("Histogram of {label}"),
        x_label: format!("{label} Value"),
        y_label: "Density".to_string(),
        x_range,
        y_range: (0.0, if peak > 0.0 { peak * 1.1 } else { 1.0 }),
        annotation: vec![
            format!("μ={:.2}", hist.mean),
            format!("median={:.2}", hist.median),
            format!("σ={:.2}", hist.std_dev),
        ],
        bars: hist.bars,
        curve: hist.fit,
        ..Panel::default()
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn zip_points(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect()
}

fn finite_extent(values: &[f64]) -> Option<(f64, f64)> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    min_max(&finite)
}

/// Widen `[lo, hi]` by 5% on each side; a degenerate range gets unit width.
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    if span > 0.0 {
        (lo - 0.05 * span, hi + 0.05 * span)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

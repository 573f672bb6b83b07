//! Density histograms with a fitted normal overlay.
//!
//! Bin count follows the Freedman–Diaconis rule capped at
//! [`Histogram::MAX_BINS`]. Bar heights are densities, so the bars integrate
//! to one and share a scale with the normal curve fitted by maximum
//! likelihood (population standard deviation). The reported `std_dev` is the
//! sample standard deviation.

// Internal dependencies
use crate::math::stats::{freedman_diaconis_bins, mean, median, min_max, normal_pdf, std_dev};

/// One histogram bar, `[left, right)` with density `height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Left bin edge.
    pub left: f64,

    /// Right bin edge.
    pub right: f64,

    /// Density of the bin.
    pub height: f64,
}

/// Density histogram and its summary statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bars in ascending order.
    pub bars: Vec<Bar>,

    /// Normal pdf sampled across the bin range; empty for a constant series.
    pub fit: Vec<(f64, f64)>,

    /// Sample mean.
    pub mean: f64,

    /// Sample median.
    pub median: f64,

    /// Sample standard deviation (`n - 1`).
    pub std_dev: f64,
}

impl Histogram {
    /// Upper bound on the number of bins.
    pub const MAX_BINS: usize = 50;

    /// Points used to draw the fitted density.
    const CURVE_POINTS: usize = 100;

    /// Build the histogram of the finite entries of `values`.
    pub fn new(values: &[f64]) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let Some((lo, hi)) = min_max(&finite) else {
            return Self {
                bars: Vec::new(),
                fit: Vec::new(),
                mean: f64::NAN,
                median: f64::NAN,
                std_dev: f64::NAN,
            };
        };

        let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) };
        let bins = freedman_diaconis_bins(&finite).clamp(1, Self::MAX_BINS);
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &v in &finite {
            // The maximum lands in the last bin.
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let scale = 1.0 / (finite.len() as f64 * width);
        let bars = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| Bar {
                left: lo + width * i as f64,
                right: lo + width * (i + 1) as f64,
                height: count as f64 * scale,
            })
            .collect();

        let mu = mean(&finite);
        let sigma_mle = std_dev(&finite, 0);
        let fit = if sigma_mle > 0.0 {
            let step = (hi - lo) / (Self::CURVE_POINTS - 1) as f64;
            (0..Self::CURVE_POINTS)
                .map(|i| {
                    let x = lo + step * i as f64;
                    (x, normal_pdf(x, mu, sigma_mle))
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            bars,
            fit,
            mean: mu,
            median: median(&finite),
            std_dev: std_dev(&finite, 1),
        }
    }

    /// Horizontal extent of the bars.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        Some((self.bars.first()?.left, self.bars.last()?.right))
    }

    /// Tallest bar or curve point.
    pub fn peak(&self) -> f64 {
        self.bars
            .iter()
            .map(|b| b.height)
            .chain(self.fit.iter().map(|&(_, d)| d))
            .fold(0.0, f64::max)
    }
}

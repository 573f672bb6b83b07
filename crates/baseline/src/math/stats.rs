//! Descriptive statistics over residual and reading series.
//!
//! ## Purpose
//!
//! This module provides the summary statistics used by the pipeline and the
//! plots: location and scale estimates, quantiles, rolling medians, the
//! logarithmic regularization grid, the normal density and histogram bin
//! selection.
//!
//! ## Design notes
//!
//! * **Generics**: Series statistics are generic over `Float` types.
//! * **Selection**: Medians use `select_nth_unstable_by` (O(n)) on a scratch copy.
//! * **Degrees of freedom**: Scale estimates take an explicit `ddof`, matching
//!   the sample (`ddof = 1`) and maximum-likelihood (`ddof = 0`) conventions.
//!
//! ## Invariants
//!
//! * Statistics of an empty series are `NaN`, except [`mean`] which is zero.
//! * [`rolling_median`] returns a series of the same length as its input.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// ============================================================================
// Location and Scale
// ============================================================================

/// Arithmetic mean. Returns zero for an empty series.
pub fn mean<T: Float>(values: &[T]) -> T {
    if values.is_empty() {
        return T::zero();
    }
    let n = T::from(values.len()).unwrap_or(T::one());
    values.iter().fold(T::zero(), |acc, &v| acc + v) / n
}

/// Variance with `ddof` delta degrees of freedom.
///
/// Returns `NaN` when `values.len() <= ddof`.
pub fn variance<T: Float>(values: &[T], ddof: usize) -> T {
    let n = values.len();
    if n <= ddof {
        return T::nan();
    }
    let m = mean(values);
    let ss = values.iter().fold(T::zero(), |acc, &v| {
        let d = v - m;
        acc + d * d
    });
    ss / T::from(n - ddof).unwrap_or(T::one())
}

/// Standard deviation with `ddof` delta degrees of freedom.
pub fn std_dev<T: Float>(values: &[T], ddof: usize) -> T {
    variance(values, ddof).sqrt()
}

/// Median of a series (average of the two middle values for even lengths).
pub fn median<T: Float>(values: &[T]) -> T {
    let mut scratch = values.to_vec();
    median_inplace(&mut scratch)
}

/// Median computed in place with quickselect; reorders `vals`.
fn median_inplace<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::nan();
    }

    let mid = n / 2;
    vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[mid];

    if n % 2 == 1 {
        return upper;
    }

    // Largest value of the lower partition
    let lower = vals[..mid]
        .iter()
        .copied()
        .fold(T::neg_infinity(), |acc, v| if v > acc { v } else { acc });

    (lower + upper) / (T::one() + T::one())
}

/// Quantile `q` in `[0, 1]` with linear interpolation between order statistics.
pub fn quantile<T: Float>(values: &[T], q: T) -> T {
    let n = values.len();
    if n == 0 {
        return T::nan();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));

    let q = q.max(T::zero()).min(T::one());
    let pos = q * T::from(n - 1).unwrap_or(T::zero());
    let lo = pos.floor().to_usize().unwrap_or(0).min(n - 1);
    let hi = (lo + 1).min(n - 1);
    let frac = pos - T::from(lo).unwrap_or(T::zero());

    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Smallest and largest finite-or-not value, or `None` for an empty series.
pub fn min_max<T: Float>(values: &[T]) -> Option<(T, T)> {
    let first = *values.first()?;
    Some(values.iter().skip(1).fold((first, first), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    }))
}

// ============================================================================
// Rolling Statistics
// ============================================================================

/// Trailing rolling median with a fixed window.
///
/// Entry `i` is the median of `values[i + 1 - window ..= i]`. The first
/// `window - 1` entries have an incomplete window and are `NaN`.
pub fn rolling_median<T: Float>(values: &[T], window: usize) -> Vec<T> {
    let n = values.len();
    let mut out = vec![T::nan(); n];
    if window == 0 {
        return out;
    }

    let mut scratch = Vec::with_capacity(window);
    for i in (window - 1)..n {
        scratch.clear();
        scratch.extend_from_slice(&values[i + 1 - window..=i]);
        out[i] = median_inplace(&mut scratch);
    }
    out
}

// ============================================================================
// Grids and Densities
// ============================================================================

/// `num` values spaced evenly on a log scale from `10^start` to `10^stop`.
pub fn logspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![10f64.powf(start)],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| 10f64.powf(start + step * i as f64))
                .collect()
        }
    }
}

/// Normal probability density at `x`.
pub fn normal_pdf<T: Float>(x: T, mu: T, sigma: T) -> T {
    let two = T::one() + T::one();
    let pi = T::from(core::f64::consts::PI).unwrap_or(T::one());
    let z = (x - mu) / sigma;
    (-(z * z) / two).exp() / (sigma * (two * pi).sqrt())
}

/// Freedman–Diaconis histogram bin count.
///
/// Bin width is `2 * IQR / n^(1/3)`. When the IQR is zero the count falls
/// back to `floor(sqrt(n))`. Always at least 1.
pub fn freedman_diaconis_bins<T: Float>(values: &[T]) -> usize {
    let n = values.len();
    if n < 2 {
        return 1;
    }

    let quarter = T::from(0.25).unwrap_or(T::zero());
    let three_quarters = T::from(0.75).unwrap_or(T::one());
    let iqr = quantile(values, three_quarters) - quantile(values, quarter);
    let n_t = T::from(n).unwrap_or(T::one());
    let two = T::one() + T::one();
    let width = two * iqr / n_t.cbrt();

    if width <= T::zero() {
        return n_t.sqrt().floor().to_usize().unwrap_or(1).max(1);
    }

    let (lo, hi) = min_max(values).unwrap_or((T::zero(), T::zero()));
    ((hi - lo) / width).ceil().to_usize().unwrap_or(1).max(1)
}

//! Human-readable baseline equations.
//!
//! Two strings are produced from a fitted model:
//!
//! ```text
//! fitted:    Value=2.013*ShaftPower + 0.4981*SeaTemp - 1.204*Draft + 12.50
//! corrected: Value=FuelRate - 0.4981*SeaTemp + 1.204*Draft
//! ```
//!
//! The corrected form subtracts the secondary-feature contribution from the
//! observed target, leaving only the primary relationship. Coefficients are
//! rounded to a number of *significant* digits; terms that round to zero
//! are omitted and the constant comes last.

// Internal dependencies
use crate::primitives::errors::BaselineError;

// ============================================================================
// Symbols and Numbers
// ============================================================================

/// Keep only the alphanumeric characters of a column label.
pub fn symbol_name(label: &str) -> String {
    label.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Round `value` to `digits` significant digits.
///
/// Precision beyond what `f64` holds returns `value` unchanged.
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() || digits == 0 {
        return value;
    }
    if digits > f64::DIGITS + 2 {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(digits as i32 - 1 - magnitude);
    let scaled = value * factor;
    if !factor.is_finite() || !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Format `value` with exactly `digits` significant digits in positional notation.
pub fn format_significant(value: f64, digits: u32) -> String {
    let digits = digits.max(1);
    let rounded = round_significant(value, digits);
    if rounded == 0.0 || !rounded.is_finite() {
        return format!("{:.*}", (digits - 1) as usize, rounded);
    }

    let magnitude = rounded.abs().log10().floor() as i32;
    let decimals = digits as i32 - 1 - magnitude;
    if decimals >= 0 {
        format!("{:.*}", decimals as usize, rounded)
    } else {
        format!("{:.0}", rounded)
    }
}

// ============================================================================
// Term Accumulation
// ============================================================================

/// Signed sum of `coefficient*symbol` terms and a trailing constant.
#[derive(Debug, Default)]
struct Terms {
    out: String,
}

impl Terms {
    fn push(&mut self, coefficient: f64, symbol: Option<&str>, digits: u32) {
        let rounded = round_significant(coefficient, digits);
        if rounded == 0.0 {
            return;
        }

        let magnitude = format_significant(rounded.abs(), digits);
        let body = match symbol {
            Some(sym) => format!("{magnitude}*{sym}"),
            None => magnitude,
        };
        self.push_signed(rounded < 0.0, &body);
    }

    fn push_symbol(&mut self, symbol: &str) {
        self.push_signed(false, symbol);
    }

    fn push_signed(&mut self, negative: bool, body: &str) {
        match (self.out.is_empty(), negative) {
            (true, false) => self.out.push_str(body),
            (true, true) => {
                self.out.push('-');
                self.out.push_str(body);
            }
            (false, false) => {
                self.out.push_str(" + ");
                self.out.push_str(body);
            }
            (false, true) => {
                self.out.push_str(" - ");
                self.out.push_str(body);
            }
        }
    }

    fn finish(self) -> String {
        if self.out.is_empty() {
            "Value=0".to_string()
        } else {
            format!("Value={}", self.out)
        }
    }
}

// ============================================================================
// Equations
// ============================================================================

/// `Value=c0*Primary + c1*Sec1 + … + intercept`.
///
/// `features[0]` pairs with `coefficients[0]` and so on.
pub fn fitted_equation<S: AsRef<str>>(
    features: &[S],
    coefficients: &[f64],
    intercept: f64,
    digits: u32,
) -> Result<String, BaselineError> {
    check_precision(digits)?;
    check_pairs(features.len(), coefficients.len())?;

    let mut terms = Terms::default();
    for (label, &coef) in features.iter().zip(coefficients) {
        terms.push(coef, Some(&symbol_name(label.as_ref())), digits);
    }
    terms.push(intercept, None, digits);
    Ok(terms.finish())
}

/// `Value=Target - c1*Sec1 - …` over the secondary features only.
pub fn corrected_equation<S: AsRef<str>>(
    target: &str,
    secondary: &[S],
    coefficients: &[f64],
    digits: u32,
) -> Result<String, BaselineError> {
    check_precision(digits)?;
    check_pairs(secondary.len(), coefficients.len())?;

    let mut terms = Terms::default();
    terms.push_symbol(&symbol_name(target));
    for (label, &coef) in secondary.iter().zip(coefficients) {
        terms.push(-coef, Some(&symbol_name(label.as_ref())), digits);
    }
    Ok(terms.finish())
}

fn check_precision(digits: u32) -> Result<(), BaselineError> {
    if digits == 0 {
        return Err(BaselineError::InvalidDigits(digits));
    }
    Ok(())
}

fn check_pairs(labels: usize, coefficients: usize) -> Result<(), BaselineError> {
    if labels != coefficients {
        return Err(BaselineError::MismatchedLengths {
            column: "coefficients".to_string(),
            expected: labels,
            got: coefficients,
        });
    }
    Ok(())
}

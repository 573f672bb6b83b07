#![cfg(feature = "dev")]
//! Tests for input validation utilities.
//!
//! These tests verify the validation functions used by the pipeline for:
//! - Model labels (presence, uniqueness)
//! - Regression inputs (row counts, lengths, numeric validity)
//! - Parameters (alpha grid, multipliers, window, precision)
//! - Builder misuse
//!
//! ## Test Organization
//!
//! 1. **Label Validation** - Target and feature labels
//! 2. **Data Validation** - Splits, design matrices, residuals
//! 3. **Parameter Validation** - Grid, multipliers, window, digits
//! 4. **Error Messages** - Proper error reporting

use baseline::internals::engine::validator::Validator;
use baseline::internals::primitives::errors::BaselineError;

// ============================================================================
// Helper Functions
// ============================================================================

fn make_valid_design() -> (Vec<Vec<f64>>, Vec<f64>) {
    (
        vec![vec![0.0, 1.0, 2.0], vec![5.0, 3.0, 4.0]],
        vec![1.0, 2.0, 3.0],
    )
}

// ============================================================================
// Label Validation Tests
// ============================================================================

/// Test validation accepts distinct labels.
#[test]
fn test_validate_labels_valid() {
    assert!(Validator::validate_labels("Fuel Rate", &["Shaft Power", "Sea Temp"]).is_ok());
}

/// Test validation rejects an empty feature list.
///
/// Verifies that a model without a primary feature produces NoFeatures.
#[test]
fn test_validate_labels_no_features() {
    let none: [&str; 0] = [];
    assert_eq!(
        Validator::validate_labels("Fuel Rate", &none),
        Err(BaselineError::NoFeatures)
    );
}

/// Test validation rejects repeated labels.
///
/// Verifies:
/// - A feature equal to the target
/// - A feature listed twice
#[test]
fn test_validate_labels_duplicates() {
    assert_eq!(
        Validator::validate_labels("Fuel Rate", &["Fuel Rate"]),
        Err(BaselineError::DuplicateColumn("Fuel Rate".to_string()))
    );
    assert_eq!(
        Validator::validate_labels("Fuel Rate", &["Draft", "Sea Temp", "Draft"]),
        Err(BaselineError::DuplicateColumn("Draft".to_string()))
    );
}

// ============================================================================
// Data Validation Tests
// ============================================================================

/// Test validation of split sizes.
#[test]
fn test_validate_split() {
    assert!(Validator::validate_split("train", 1).is_ok());
    assert_eq!(
        Validator::validate_split("test", 0),
        Err(BaselineError::EmptyInput { split: "test" })
    );
}

/// Test validation accepts a well-formed design.
#[test]
fn test_validate_design_valid() {
    let (x, y) = make_valid_design();
    assert!(Validator::validate_design(&x, &y).is_ok());
}

/// Test validation rejects structural design errors.
///
/// Verifies:
/// - No feature columns
/// - A single row
/// - A short feature column
#[test]
fn test_validate_design_structure() {
    let (x, y) = make_valid_design();

    assert_eq!(
        Validator::validate_design(&[], &y),
        Err(BaselineError::NoFeatures)
    );
    assert_eq!(
        Validator::validate_design(&[vec![1.0]], &[1.0]),
        Err(BaselineError::TooFewPoints { got: 1, min: 2 })
    );

    let ragged = vec![x[0].clone(), vec![1.0, 2.0]];
    assert_eq!(
        Validator::validate_design(&ragged, &y),
        Err(BaselineError::MismatchedLengths {
            column: "feature[1]".to_string(),
            expected: 3,
            got: 2,
        })
    );
}

/// Test validation rejects non-finite values.
///
/// Verifies that NaN in the target and infinity in a feature are reported
/// with their position.
#[test]
fn test_validate_design_non_finite() {
    let (x, mut y) = make_valid_design();
    y[1] = f64::NAN;
    assert!(matches!(
        Validator::validate_design(&x, &y),
        Err(BaselineError::InvalidNumericValue(msg)) if msg.starts_with("y[1]")
    ));

    let (mut x, y) = make_valid_design();
    x[1][2] = f64::INFINITY;
    assert!(matches!(
        Validator::validate_design(&x, &y),
        Err(BaselineError::InvalidNumericValue(msg)) if msg.starts_with("feature[1][2]")
    ));
}

/// Test that residual limits need at least two residuals.
#[test]
fn test_validate_residuals() {
    assert!(Validator::validate_residuals(&[0.1, -0.2]).is_ok());
    assert_eq!(
        Validator::validate_residuals(&[0.1]),
        Err(BaselineError::TooFewPoints { got: 1, min: 2 })
    );
}

// ============================================================================
// Parameter Validation Tests
// ============================================================================

/// Test alpha grid validation.
///
/// Verifies that empty, zero, negative and non-finite grids are rejected.
#[test]
fn test_validate_alphas() {
    assert!(Validator::validate_alphas(&[1e-3, 1.0, 1e3]).is_ok());

    for bad in [vec![], vec![0.0], vec![1.0, -2.0], vec![f64::INFINITY]] {
        assert!(
            matches!(
                Validator::validate_alphas(&bad),
                Err(BaselineError::InvalidAlphas(_))
            ),
            "grid {bad:?} should be rejected"
        );
    }
}

/// Test multiplier validation.
#[test]
fn test_validate_multiplier() {
    assert!(Validator::validate_multiplier("warning", 0.0).is_ok());
    assert!(Validator::validate_multiplier("alarm", 3.0).is_ok());
    assert_eq!(
        Validator::validate_multiplier("alarm", -0.5),
        Err(BaselineError::InvalidMultiplier {
            name: "alarm",
            value: -0.5
        })
    );
    assert!(Validator::validate_multiplier("warning", f64::NAN).is_err());
}

/// Test window and precision validation.
#[test]
fn test_validate_window_and_digits() {
    assert!(Validator::validate_window(1).is_ok());
    assert_eq!(
        Validator::validate_window(0),
        Err(BaselineError::InvalidWindow(0))
    );

    assert!(Validator::validate_significant_digits(1).is_ok());
    assert_eq!(
        Validator::validate_significant_digits(0),
        Err(BaselineError::InvalidDigits(0))
    );
}

/// Test duplicate builder parameter detection.
#[test]
fn test_validate_no_duplicates() {
    assert!(Validator::validate_no_duplicates(None).is_ok());
    assert_eq!(
        Validator::validate_no_duplicates(Some("target")),
        Err(BaselineError::DuplicateParameter { parameter: "target" })
    );
}

// ============================================================================
// Error Messages Tests
// ============================================================================

/// Test that error messages carry their context.
#[test]
fn test_error_messages() {
    let err = Validator::validate_split("train", 0).unwrap_err();
    assert_eq!(err.to_string(), "The train split has no complete rows");

    let err = Validator::validate_window(0).unwrap_err();
    assert!(err.to_string().contains("median window: 0"));

    let err = BaselineError::StageOrder {
        stage: "plot",
        requires: "metrics",
    };
    assert_eq!(err.to_string(), "Stage 'plot' requires 'metrics' to run first");
}

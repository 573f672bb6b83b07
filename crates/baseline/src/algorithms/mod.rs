//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides the regression estimator: a ridge fit whose penalty
//! strength is selected by closed-form leave-one-out cross-validation.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API / Plot
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Cross-validated ridge regression.
pub mod ridge;

//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer turns a fitted model into reportable artifacts:
//! - Accuracy metrics and residual alarm limits
//! - Human-readable fitted and corrected equations
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API / Plot
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Accuracy metrics and alarm limits.
pub mod metrics;

/// Equation strings.
pub mod equation;

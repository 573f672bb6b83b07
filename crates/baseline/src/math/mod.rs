//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions: descriptive statistics,
//! rolling windows, grids and design-matrix preparation.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Descriptive and rolling statistics.
pub mod stats;

/// Centering and normalization of design matrices.
pub mod linalg;

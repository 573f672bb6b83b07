//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates a baseline from raw frames to scored residuals by
//! coordinating the ridge estimator (algorithms) with metrics and equation
//! builders (evaluation). It owns stage ordering, timing and validation.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API / Plot
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Staged regression pipeline.
pub mod model;

/// Run configuration.
pub mod config;

/// Validation utilities.
pub mod validator;

//! # Config Crate
//!
//! Centralized configuration constants for the CAD modeling crates.
//! Tolerances, tessellation defaults, and export/watch settings are defined
//! here so every crate agrees on the same values.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{approx_zero, DEFAULT_DEDUP_TOLERANCE, DEFAULT_SEGMENTS, EPSILON};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(approx_zero(value));
//! assert!(value.abs() < EPSILON);
//!
//! // Dedup tolerance is much coarser than EPSILON
//! assert!(DEFAULT_DEDUP_TOLERANCE > EPSILON);
//! assert_eq!(DEFAULT_SEGMENTS, 24);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Explicit Policy**: Dedup tolerance and winding are documented values,
//!   not per-call-site guesses

pub mod constants;

#[cfg(test)]
mod tests;

//! # Configuration Constants
//!
//! Centralized constants for the modeling crates.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison and vertex merge tolerances
//! - **Resolution**: Default tessellation parameters for round primitives
//! - **Export**: STL layout and output directory defaults
//! - **Watch**: Live-reload polling settings

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// A vector whose length is at or below this value is treated as zero-length
/// (degenerate) by normalization and cross products.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Default distance at which two points collapse into one vertex.
///
/// Used by the mesh builder when no explicit tolerance is given. Points with
/// `|a - b| <= DEFAULT_DEDUP_TOLERANCE` share a vertex table entry, and the
/// first point seen keeps its position.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_DEDUP_TOLERANCE;
///
/// fn should_merge(a: [f64; 3], b: [f64; 3]) -> bool {
///     let dx = a[0] - b[0];
///     let dy = a[1] - b[1];
///     let dz = a[2] - b[2];
///     (dx * dx + dy * dy + dz * dz).sqrt() <= DEFAULT_DEDUP_TOLERANCE
/// }
///
/// assert!(should_merge([0.0, 0.0, 0.0], [0.00005, 0.0, 0.0]));
/// assert!(!should_merge([0.0, 0.0, 0.0], [0.001, 0.0, 0.0]));
/// ```
pub const DEFAULT_DEDUP_TOLERANCE: f64 = 1e-4;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Default number of segments around a cylinder, cone, or revolved profile.
pub const DEFAULT_SEGMENTS: u32 = 24;

/// Minimum number of segments for any round primitive.
///
/// Fewer than 3 segments cannot enclose a volume.
pub const MIN_SEGMENTS: u32 = 3;

/// Degrees in a full revolution.
///
/// Rotations at or above this value are treated as closed (wrapping) sweeps.
pub const FULL_TURN_DEGREES: f64 = 360.0;

// =============================================================================
// EXPORT CONSTANTS
// =============================================================================

/// Directory name used for exported files when no output directory is given.
pub const DEFAULT_OUT_DIR_NAME: &str = "stl_out";

/// Size of the binary STL header in bytes.
pub const STL_HEADER_SIZE: usize = 80;

/// Size of one binary STL triangle record in bytes.
///
/// Normal (12) + three vertices (36) + attribute byte count (2).
pub const STL_TRIANGLE_SIZE: usize = 50;

// =============================================================================
// WATCH CONSTANTS
// =============================================================================

/// Default polling interval for the live-reload loop, in milliseconds.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_POLL_INTERVAL_MS;
/// use std::time::Duration;
///
/// let interval = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);
/// assert_eq!(interval.as_millis(), 500);
/// ```
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero (at or below EPSILON).
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() <= EPSILON
}

/// Clamps a requested rotation to a full turn and reports whether it wraps.
///
/// Returns `(degrees, wraps)` where `wraps` is true when the sweep closes on
/// itself.
///
/// # Example
///
/// ```rust
/// use config::constants::clamp_rotation;
///
/// assert_eq!(clamp_rotation(720.0), (360.0, true));
/// assert_eq!(clamp_rotation(90.0), (90.0, false));
/// ```
#[inline]
pub fn clamp_rotation(degrees: f64) -> (f64, bool) {
    if degrees >= FULL_TURN_DEGREES {
        (FULL_TURN_DEGREES, true)
    } else {
        (degrees, false)
    }
}

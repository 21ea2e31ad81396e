//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_epsilon_is_small() {
    assert!(EPSILON < 1e-6, "EPSILON should be small for precision");
}

#[test]
fn test_dedup_tolerance_larger_than_epsilon() {
    assert!(
        DEFAULT_DEDUP_TOLERANCE > EPSILON,
        "DEFAULT_DEDUP_TOLERANCE should be coarser than EPSILON"
    );
}

#[test]
fn test_dedup_tolerance_default() {
    assert_eq!(DEFAULT_DEDUP_TOLERANCE, 1e-4);
}

// =============================================================================
// RESOLUTION TESTS
// =============================================================================

#[test]
fn test_min_segments_at_least_three() {
    // A ring needs at least 3 points to enclose an area
    assert!(MIN_SEGMENTS >= 3);
}

#[test]
fn test_default_segments_above_minimum() {
    assert!(DEFAULT_SEGMENTS >= MIN_SEGMENTS);
}

#[test]
fn test_clamp_rotation_full_turn_wraps() {
    assert_eq!(clamp_rotation(360.0), (360.0, true));
    assert_eq!(clamp_rotation(400.0), (360.0, true));
}

#[test]
fn test_clamp_rotation_partial_turn() {
    assert_eq!(clamp_rotation(180.0), (180.0, false));
    assert_eq!(clamp_rotation(359.9), (359.9, false));
}

// =============================================================================
// EXPORT TESTS
// =============================================================================

#[test]
fn test_stl_triangle_record_size() {
    // normal + 3 vertices, each 3 x f32, plus u16 attribute count
    assert_eq!(STL_TRIANGLE_SIZE, 4 * 3 * 4 + 2);
}

#[test]
fn test_default_out_dir_name() {
    assert_eq!(DEFAULT_OUT_DIR_NAME, "stl_out");
}

// =============================================================================
// APPROX_EQUAL TESTS
// =============================================================================

#[test]
fn test_approx_equal_same_values() {
    assert!(approx_equal(1.0, 1.0));
    assert!(approx_equal(0.0, 0.0));
    assert!(approx_equal(-5.5, -5.5));
}

#[test]
fn test_approx_equal_within_epsilon() {
    let small_diff = EPSILON / 2.0;
    assert!(approx_equal(1.0, 1.0 + small_diff));
    assert!(approx_equal(1.0, 1.0 - small_diff));
}

#[test]
fn test_approx_equal_outside_epsilon() {
    let large_diff = EPSILON * 2.0;
    assert!(!approx_equal(1.0, 1.0 + large_diff));
    assert!(!approx_equal(1.0, 1.0 - large_diff));
}

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(EPSILON));
    assert!(approx_zero(-EPSILON / 2.0));
    assert!(!approx_zero(EPSILON * 10.0));
}

//! Tests for the cube primitive.
//!
//! These tests verify that the cube primitive:
//! - Creates 8 vertices and 6 quads
//! - Winds every face outward
//! - Places centered and ranged boxes correctly
//! - Rejects invalid sizes

use glam::DVec3;

use super::*;

const FACE_NORMALS: [DVec3; 6] = [
    DVec3::NEG_Z,
    DVec3::Z,
    DVec3::X,
    DVec3::NEG_Y,
    DVec3::NEG_X,
    DVec3::Y,
];

#[test]
fn test_cube_counts() {
    let c = cube(1.0, 1.0, 1.0).unwrap();
    assert_eq!(c.vertex_count(), 8);
    assert_eq!(c.face_count(), 6);
    assert_eq!(c.triangle_count(), 12);
    assert!(c.validate().is_ok());
}

/// Each quad's normal matches the side of the box it lies on.
#[test]
fn test_cube_faces_point_outward() {
    let c = cube(2.0, 3.0, 4.0).unwrap();
    for (i, expected) in FACE_NORMALS.iter().enumerate() {
        let n = c.face_normal(i).unwrap();
        assert!(n.abs_diff_eq(*expected, 1e-12), "face {i}: {n} != {expected}");
    }
}

#[test]
fn test_cube_is_centered() {
    let c = cube(2.0, 3.0, 4.0).unwrap();
    let (min, max) = c.bounding_box();
    assert_eq!(min, DVec3::new(-1.0, -1.5, -2.0));
    assert_eq!(max, DVec3::new(1.0, 1.5, 2.0));
}

#[test]
fn test_range_cube_bounds() {
    let c = range_cube((0.0, 2.0), (-1.0, 1.0), (5.0, 6.0)).unwrap();
    let (min, max) = c.bounding_box();
    assert_eq!(min, DVec3::new(0.0, -1.0, 5.0));
    assert_eq!(max, DVec3::new(2.0, 1.0, 6.0));
    for (i, expected) in FACE_NORMALS.iter().enumerate() {
        assert!(c.face_normal(i).unwrap().abs_diff_eq(*expected, 1e-12));
    }
}

#[test]
fn test_cube_rejects_bad_sizes() {
    assert!(matches!(
        cube(0.0, 1.0, 1.0),
        Err(MeshError::InvalidParameter { .. })
    ));
    assert!(cube(1.0, -1.0, 1.0).is_err());
    assert!(cube(1.0, 1.0, f64::NAN).is_err());
    assert!(range_cube((1.0, 0.0), (0.0, 1.0), (0.0, 1.0)).is_err());
    assert!(range_cube((0.0, 1.0), (0.0, 0.0), (0.0, 1.0)).is_err());
}

/// Edges no longer than the dedup tolerance would merge corners.
#[test]
fn test_cube_rejects_edges_below_tolerance() {
    assert!(matches!(
        cube(5e-5, 1.0, 1.0),
        Err(MeshError::InvalidParameter { .. })
    ));
    assert!(range_cube((0.0, 1.0), (0.0, 1.0), (2.0, 2.0 + 1e-4)).is_err());

    let thin = cube(1e-3, 1.0, 1.0).unwrap();
    assert_eq!(thin.vertex_count(), 8);
    assert_eq!(thin.face_count(), 6);
}

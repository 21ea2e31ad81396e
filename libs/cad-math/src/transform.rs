//! # Transforms
//!
//! Affine transforms as immutable 4x4 matrix values.
//!
//! ## Builder Order
//!
//! Every builder call appends a step that is applied AFTER the steps already
//! in the transform:
//!
//! ```text
//! Transform::identity().scale(2, 2, 2).translate(5, 0, 0)
//!   => scale first, then translate
//! ```
//!
//! [`Transform::compose`] builds the same kind of value from parts with the
//! fixed order scale, rotate, translate (`M = T * R * S`).

use std::fmt;

use glam::{DMat3, DMat4, DVec3};
use serde::{Deserialize, Serialize};

use config::constants::EPSILON;

use crate::error::{GeometryError, GeometryResult};
use crate::vector::{Point3, VectorExt};

// =============================================================================
// ROTATION
// =============================================================================

/// A rotation about the origin, used by [`Transform::compose`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Rotation {
    /// No rotation.
    None,
    /// Right-handed rotation of `angle` radians about `axis`.
    AxisAngle { axis: DVec3, angle: f64 },
    /// Rotation about X, then Y, then Z, in degrees.
    EulerDegrees(DVec3),
    /// An explicit 3x3 rotation matrix.
    Matrix(DMat3),
}

impl Rotation {
    /// Returns the rotation as a 4x4 matrix.
    ///
    /// Fails with `DegenerateVector` for a zero-length axis.
    pub fn to_matrix(&self) -> GeometryResult<DMat4> {
        match *self {
            Rotation::None => Ok(DMat4::IDENTITY),
            Rotation::AxisAngle { axis, angle } => {
                let axis = axis.unit()?;
                Ok(DMat4::from_axis_angle(axis, angle))
            }
            Rotation::EulerDegrees(angles) => Ok(euler_matrix(
                angles.x.to_radians(),
                angles.y.to_radians(),
                angles.z.to_radians(),
            )),
            Rotation::Matrix(m) => Ok(DMat4::from_mat3(m)),
        }
    }
}

/// Rotation about X, then Y, then Z: `Rz * Ry * Rx`.
fn euler_matrix(x: f64, y: f64, z: f64) -> DMat4 {
    DMat4::from_rotation_z(z) * DMat4::from_rotation_y(y) * DMat4::from_rotation_x(x)
}

// =============================================================================
// TRANSFORM
// =============================================================================

/// An affine transform.
///
/// Transforms never mutate what they are applied to; see
/// [`Transformable`] for producing transformed copies.
///
/// # Example
///
/// ```rust
/// use cad_math::{Point3, Transform};
///
/// let tf = Transform::identity()
///     .scale(2.0, 2.0, 2.0)
///     .translate(5.0, 0.0, 0.0);
/// let p = tf.apply_point(Point3::new(1.0, 1.0, 1.0));
/// assert_eq!(p, Point3::new(7.0, 2.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    matrix: DMat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: DMat4::IDENTITY,
        }
    }

    /// Wraps an existing affine matrix.
    pub fn from_matrix(matrix: DMat4) -> Self {
        Self { matrix }
    }

    /// Builds `translate * rotate * scale` from parts.
    ///
    /// Points are scaled first, then rotated about the origin, then
    /// translated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cad_math::{Point3, Rotation, Transform};
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let tf = Transform::compose(
    ///     Point3::new(2.0, 1.0, 1.0),
    ///     Rotation::AxisAngle { axis: Point3::Z, angle: FRAC_PI_2 },
    ///     Point3::new(0.0, 0.0, 10.0),
    /// ).unwrap();
    /// let p = tf.apply_point(Point3::X);
    /// assert!((p - Point3::new(0.0, 2.0, 10.0)).length() < 1e-12);
    /// ```
    pub fn compose(scale: DVec3, rotation: Rotation, translation: DVec3) -> GeometryResult<Self> {
        let rotation = rotation.to_matrix()?;
        Ok(Self {
            matrix: DMat4::from_translation(translation) * rotation * DMat4::from_scale(scale),
        })
    }

    /// Returns the underlying matrix.
    #[inline]
    pub fn matrix(&self) -> DMat4 {
        self.matrix
    }

    /// Returns the translation component (where the origin ends up).
    #[inline]
    pub fn translation(&self) -> Point3 {
        self.matrix.w_axis.truncate()
    }

    /// Appends another transform: `self` is applied first, then `next`.
    #[must_use]
    pub fn then(self, next: Transform) -> Self {
        Self {
            matrix: next.matrix * self.matrix,
        }
    }

    fn append(self, step: DMat4) -> Self {
        Self {
            matrix: step * self.matrix,
        }
    }

    /// Appends a translation.
    #[must_use]
    pub fn translate(self, x: f64, y: f64, z: f64) -> Self {
        self.append(DMat4::from_translation(DVec3::new(x, y, z)))
    }

    /// Appends a translation by a vector.
    #[must_use]
    pub fn translate_by(self, offset: DVec3) -> Self {
        self.append(DMat4::from_translation(offset))
    }

    /// Appends a rotation about X, then Y, then Z (degrees).
    #[must_use]
    pub fn rotate_degrees(self, x: f64, y: f64, z: f64) -> Self {
        self.rotate_radians(x.to_radians(), y.to_radians(), z.to_radians())
    }

    /// Appends a rotation about X, then Y, then Z (radians).
    #[must_use]
    pub fn rotate_radians(self, x: f64, y: f64, z: f64) -> Self {
        self.append(euler_matrix(x, y, z))
    }

    /// Appends a right-handed rotation about an axis through `center`.
    ///
    /// # Arguments
    ///
    /// * `axis` - Rotation axis direction (normalized internally)
    /// * `angle` - Angle in radians, counter-clockwise looking down the axis
    /// * `center` - A point the axis passes through
    ///
    /// # Errors
    ///
    /// `DegenerateVector` when `axis` has zero length.
    pub fn rotate_about_axis(self, axis: DVec3, angle: f64, center: Point3) -> GeometryResult<Self> {
        let axis = axis.unit()?;
        let step = DMat4::from_translation(center)
            * DMat4::from_axis_angle(axis, angle)
            * DMat4::from_translation(-center);
        Ok(self.append(step))
    }

    /// Appends a per-axis scale about the origin.
    #[must_use]
    pub fn scale(self, x: f64, y: f64, z: f64) -> Self {
        self.append(DMat4::from_scale(DVec3::new(x, y, z)))
    }

    /// Appends a reflection across the YZ plane.
    #[must_use]
    pub fn mirror_x(self) -> Self {
        self.scale(-1.0, 1.0, 1.0)
    }

    /// Appends a reflection across the XZ plane.
    #[must_use]
    pub fn mirror_y(self) -> Self {
        self.scale(1.0, -1.0, 1.0)
    }

    /// Appends a reflection across the XY plane.
    #[must_use]
    pub fn mirror_z(self) -> Self {
        self.scale(1.0, 1.0, -1.0)
    }

    /// Returns the inverse transform.
    ///
    /// # Errors
    ///
    /// `SingularTransform` when the transform collapses space (a zero scale
    /// factor). The determinant is compared relative to the transform's own
    /// scale, so small but non-zero scales still invert.
    pub fn inverse(&self) -> GeometryResult<Self> {
        let det = self.matrix.determinant();
        let linear = DMat3::from_mat4(self.matrix);
        let scale = linear
            .x_axis
            .length()
            .max(linear.y_axis.length())
            .max(linear.z_axis.length());
        if !det.is_finite() || det.abs() <= EPSILON * scale.powi(3) {
            return Err(GeometryError::singular_transform(format!(
                "determinant {det} cannot be inverted"
            )));
        }
        Ok(Self {
            matrix: self.matrix.inverse(),
        })
    }

    /// True when the transform flips handedness (mirror, negative scale).
    ///
    /// Faces transformed by such a transform must be reversed to keep their
    /// normals pointing outward.
    #[inline]
    pub fn reverses_orientation(&self) -> bool {
        self.matrix.determinant() < 0.0
    }

    /// Applies the transform to a point.
    #[inline]
    pub fn apply_point(&self, point: Point3) -> Point3 {
        self.matrix.transform_point3(point)
    }

    /// Applies the transform to a direction (ignores translation).
    #[inline]
    pub fn apply_vector(&self, vector: DVec3) -> DVec3 {
        self.matrix.transform_vector3(vector)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..4 {
            let row = self.matrix.row(i);
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{}, {}, {}, {}]", row.x, row.y, row.z, row.w)?;
        }
        write!(f, "]")
    }
}

// =============================================================================
// TRANSFORMABLE
// =============================================================================

/// Values that can produce a transformed copy of themselves.
pub trait Transformable {
    /// The type of the transformed copy.
    type Output;

    /// Returns a transformed copy, leaving `self` untouched.
    fn transformed(&self, transform: &Transform) -> Self::Output;
}

impl Transformable for Point3 {
    type Output = Point3;

    fn transformed(&self, transform: &Transform) -> Point3 {
        transform.apply_point(*self)
    }
}

impl Transformable for [Point3] {
    type Output = Vec<Point3>;

    fn transformed(&self, transform: &Transform) -> Vec<Point3> {
        self.iter().map(|p| transform.apply_point(*p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_point_eq(actual: Point3, expected: Point3) {
        assert!(
            actual.abs_diff_eq(expected, 1e-9),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_identity_is_noop() {
        let p = Point3::new(1.0, -2.0, 3.5);
        assert_eq!(Transform::identity().apply_point(p), p);
        assert_eq!(Transform::default(), Transform::identity());
    }

    #[test]
    fn test_translate() {
        let tf = Transform::identity().translate(1.0, 2.0, 3.0);
        assert_eq!(tf.apply_point(Point3::ZERO), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(tf.translation(), Point3::new(1.0, 2.0, 3.0));
        // Directions ignore translation
        assert_eq!(tf.apply_vector(Point3::X), Point3::X);
    }

    #[test]
    fn test_steps_apply_in_call_order() {
        let p = Point3::new(1.0, 0.0, 0.0);
        let translate_then_scale = Transform::identity().translate(1.0, 0.0, 0.0).scale(2.0, 2.0, 2.0);
        let scale_then_translate = Transform::identity().scale(2.0, 2.0, 2.0).translate(1.0, 0.0, 0.0);
        assert_point_eq(translate_then_scale.apply_point(p), Point3::new(4.0, 0.0, 0.0));
        assert_point_eq(scale_then_translate.apply_point(p), Point3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_then_matches_chained_builder() {
        let a = Transform::identity().rotate_degrees(0.0, 0.0, 90.0);
        let b = Transform::identity().translate(0.0, 0.0, 5.0);
        let p = Point3::new(1.0, 0.0, 0.0);
        assert_point_eq(a.then(b).apply_point(p), Point3::new(0.0, 1.0, 5.0));
    }

    #[test]
    fn test_rotate_degrees_order_x_then_z() {
        // Y axis rotated 90 about X lands on Z; Z rotated 90 about Z stays Z
        let tf = Transform::identity().rotate_degrees(90.0, 0.0, 90.0);
        assert_point_eq(tf.apply_point(Point3::Y), Point3::Z);
        // X axis: unaffected by X rotation, then Z rotation sends it to Y
        assert_point_eq(tf.apply_point(Point3::X), Point3::Y);
    }

    #[test]
    fn test_rotate_about_axis_right_handed() {
        let tf = Transform::identity()
            .rotate_about_axis(Point3::Z, FRAC_PI_2, Point3::ZERO)
            .unwrap();
        assert_point_eq(tf.apply_point(Point3::X), Point3::Y);
    }

    #[test]
    fn test_rotate_about_axis_through_center() {
        let center = Point3::new(1.0, 1.0, 0.0);
        let tf = Transform::identity()
            .rotate_about_axis(Point3::Z, PI, center)
            .unwrap();
        assert_point_eq(tf.apply_point(Point3::new(2.0, 1.0, 0.0)), Point3::new(0.0, 1.0, 0.0));
        assert_point_eq(tf.apply_point(center), center);
    }

    #[test]
    fn test_rotate_about_zero_axis_fails() {
        let err = Transform::identity()
            .rotate_about_axis(Point3::ZERO, 1.0, Point3::ZERO)
            .unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateVector { .. }));
    }

    #[test]
    fn test_compose_order_scale_rotate_translate() {
        let tf = Transform::compose(
            Point3::new(3.0, 1.0, 1.0),
            Rotation::EulerDegrees(Point3::new(0.0, 0.0, 90.0)),
            Point3::new(10.0, 0.0, 0.0),
        )
        .unwrap();
        // (1,0,0) -> scale (3,0,0) -> rotate (0,3,0) -> translate (10,3,0)
        assert_point_eq(tf.apply_point(Point3::X), Point3::new(10.0, 3.0, 0.0));
    }

    #[test]
    fn test_compose_with_matrix_rotation() {
        let tf = Transform::compose(
            Point3::ONE,
            Rotation::Matrix(DMat3::from_rotation_x(FRAC_PI_2)),
            Point3::ZERO,
        )
        .unwrap();
        assert_point_eq(tf.apply_point(Point3::Y), Point3::Z);
    }

    #[test]
    fn test_inverse_round_trip() {
        let transforms = [
            Transform::identity().translate(1.0, -2.0, 3.0),
            Transform::identity().rotate_degrees(30.0, 45.0, 60.0),
            Transform::identity().scale(2.0, 0.5, -3.0),
            Transform::identity()
                .scale(1.5, 2.0, 0.25)
                .rotate_about_axis(Point3::new(1.0, 1.0, 0.0), 0.7, Point3::new(3.0, 0.0, 1.0))
                .unwrap()
                .translate(-4.0, 2.0, 9.0),
            Transform::identity().mirror_y().translate(0.0, 0.0, 1.0),
        ];
        let points = [
            Point3::ZERO,
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-7.5, 0.25, 100.0),
        ];
        for tf in transforms {
            let inv = tf.inverse().unwrap();
            for p in points {
                let back = inv.apply_point(tf.apply_point(p));
                assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-9);
                assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-9);
                assert_abs_diff_eq!(back.z, p.z, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_inverse_round_trip_small_scale() {
        let tf = Transform::identity()
            .scale(1e-3, 1e-3, 1e-3)
            .scale(0.1, 0.1, 0.1)
            .translate(2e-4, 0.0, -1e-4);
        let inv = tf.inverse().unwrap();
        let p = Point3::new(120.0, -35.0, 7.5);
        let back = inv.apply_point(tf.apply_point(p));
        assert_relative_eq!(back.x, p.x, max_relative = 1e-9);
        assert_relative_eq!(back.y, p.y, max_relative = 1e-9);
        assert_relative_eq!(back.z, p.z, max_relative = 1e-9);

        assert!(Transform::identity().scale(1e-4, 1e-4, 1e-4).inverse().is_ok());
    }

    #[test]
    fn test_inverse_zero_scale_fails() {
        let err = Transform::identity().scale(1.0, 0.0, 1.0).inverse().unwrap_err();
        assert!(matches!(err, GeometryError::SingularTransform { .. }));
    }

    #[test]
    fn test_mirror_reverses_orientation() {
        assert!(Transform::identity().mirror_x().reverses_orientation());
        assert!(Transform::identity().mirror_z().reverses_orientation());
        assert!(!Transform::identity().mirror_x().mirror_y().reverses_orientation());
        assert!(!Transform::identity().rotate_degrees(10.0, 20.0, 30.0).reverses_orientation());
    }

    #[test]
    fn test_mirror_y_only_flips_y() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(Transform::identity().mirror_y().apply_point(p), Point3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn test_transformed_does_not_mutate() {
        let ring = vec![Point3::X, Point3::Y, Point3::Z];
        let tf = Transform::identity().translate(1.0, 0.0, 0.0);
        let moved = ring.transformed(&tf);
        assert_eq!(ring, vec![Point3::X, Point3::Y, Point3::Z]);
        assert_eq!(moved[0], Point3::new(2.0, 0.0, 0.0));
        assert_eq!(Point3::Z.transformed(&tf), Point3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_display_rows() {
        let tf = Transform::identity().translate(1.0, 2.0, 3.0);
        assert_eq!(
            tf.to_string(),
            "[[1, 0, 0, 1], [0, 1, 0, 2], [0, 0, 1, 3], [0, 0, 0, 1]]"
        );
    }
}

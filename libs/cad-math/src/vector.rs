//! # Points and Vectors
//!
//! `Point3` and `Point2` are the glam f64 vectors. They double as points and
//! vectors, are `Copy`, and compare by coordinates only.
//!
//! Arithmetic (`+`, `-`, `* f64`), `dot`, `cross`, and `length` come straight
//! from glam. The extension traits here add the operations that must fail on
//! degenerate input instead of quietly producing NaN.

use config::constants::approx_zero;

use crate::error::{GeometryError, GeometryResult};

pub use glam::DVec2 as Point2;
pub use glam::DVec3 as Point3;

// =============================================================================
// COMMON VECTOR OPERATIONS
// =============================================================================

/// Fallible vector helpers shared by `Point2` and `Point3`.
///
/// # Example
///
/// ```rust
/// use cad_math::{Point3, VectorExt};
///
/// let v = Point3::new(3.0, 0.0, 4.0);
/// let u = v.unit().unwrap();
/// assert!((u.length() - 1.0).abs() < 1e-12);
///
/// assert!(Point3::ZERO.unit().is_err());
/// ```
pub trait VectorExt: Sized + Copy {
    /// Returns true when the vector's length is at or below `EPSILON`.
    fn is_degenerate(self) -> bool;

    /// Returns this vector scaled to length 1.0.
    ///
    /// Fails with `DegenerateVector` for a zero-length vector.
    fn unit(self) -> GeometryResult<Self>;

    /// Angle to another vector in radians, in `[0, pi]`.
    fn angle_to(self, other: Self) -> GeometryResult<f64>;

    /// Linear interpolation: `self + (other - self) * t`.
    ///
    /// `t` is not clamped, so values outside `[0, 1]` extrapolate.
    fn interpolate(self, other: Self, t: f64) -> Self;

    /// True when the points are within `tolerance` of each other.
    fn within(self, other: Self, tolerance: f64) -> bool;
}

macro_rules! impl_vector_ext {
    ($($ty:ty),+) => {$(
        impl VectorExt for $ty {
            #[inline]
            fn is_degenerate(self) -> bool {
                approx_zero(self.length())
            }

            fn unit(self) -> GeometryResult<Self> {
                if self.is_degenerate() {
                    return Err(GeometryError::degenerate_vector(format!(
                        "cannot normalize zero-length vector {self}"
                    )));
                }
                Ok(self / self.length())
            }

            fn angle_to(self, other: Self) -> GeometryResult<f64> {
                if self.is_degenerate() || other.is_degenerate() {
                    return Err(GeometryError::degenerate_vector(format!(
                        "cannot compute angle between {self} and {other}"
                    )));
                }
                let cos = self.dot(other) / (self.length() * other.length());
                Ok(cos.clamp(-1.0, 1.0).acos())
            }

            #[inline]
            fn interpolate(self, other: Self, t: f64) -> Self {
                self + (other - self) * t
            }

            #[inline]
            fn within(self, other: Self, tolerance: f64) -> bool {
                self.distance(other) <= tolerance
            }
        }
    )+};
}

impl_vector_ext!(Point3, Point2);

// =============================================================================
// 3D-ONLY OPERATIONS
// =============================================================================

/// Helpers that only make sense in three dimensions.
pub trait Point3Ext: Sized {
    /// Cross product that rejects zero-length operands.
    ///
    /// Parallel (but non-zero) operands yield the zero vector, which is a
    /// valid answer; only zero-length inputs are errors.
    fn checked_cross(self, other: Self) -> GeometryResult<Self>;

    /// Translates by individual components.
    fn translate(self, x: f64, y: f64, z: f64) -> Self;

    /// Reflects across the YZ plane.
    fn mirror_x(self) -> Self;

    /// Reflects across the XZ plane.
    fn mirror_y(self) -> Self;

    /// Reflects across the XY plane.
    fn mirror_z(self) -> Self;
}

impl Point3Ext for Point3 {
    fn checked_cross(self, other: Self) -> GeometryResult<Self> {
        if self.is_degenerate() || other.is_degenerate() {
            return Err(GeometryError::degenerate_vector(format!(
                "cross product with zero-length operand: {self} x {other}"
            )));
        }
        Ok(self.cross(other))
    }

    #[inline]
    fn translate(self, x: f64, y: f64, z: f64) -> Self {
        self + Point3::new(x, y, z)
    }

    #[inline]
    fn mirror_x(self) -> Self {
        Point3::new(-self.x, self.y, self.z)
    }

    #[inline]
    fn mirror_y(self) -> Self {
        Point3::new(self.x, -self.y, self.z)
    }

    #[inline]
    fn mirror_z(self) -> Self {
        Point3::new(self.x, self.y, -self.z)
    }
}

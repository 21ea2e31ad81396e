//! # Planes
//!
//! A plane through three points. Used to offset walls by a thickness and to
//! find where neighbouring walls meet.
//!
//! The normal follows the right-hand rule: when the three points are listed
//! counter-clockwise as seen by a viewer, the normal points at the viewer.
//! This matches the face winding used for meshes.

use config::constants::{approx_zero, EPSILON};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::vector::{Point2, Point3, VectorExt};

/// A plane through three points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
}

impl Plane {
    /// Creates a plane through three points.
    pub fn new(p0: Point3, p1: Point3, p2: Point3) -> Self {
        Self { p0, p1, p2 }
    }

    /// Un-normalized normal `(p1 - p0) x (p2 - p0)`.
    #[inline]
    fn raw_normal(&self) -> Point3 {
        (self.p1 - self.p0).cross(self.p2 - self.p0)
    }

    /// Unit normal of the plane.
    ///
    /// Fails with `DegeneratePlane` when the three points are collinear.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cad_math::{Plane, Point3};
    ///
    /// let floor = Plane::new(Point3::ZERO, Point3::X, Point3::Y);
    /// assert_eq!(floor.normal().unwrap(), Point3::Z);
    /// ```
    pub fn normal(&self) -> GeometryResult<Point3> {
        self.raw_normal().unit().map_err(|_| {
            GeometryError::degenerate_plane(format!(
                "points {}, {}, {} are collinear",
                self.p0, self.p1, self.p2
            ))
        })
    }

    /// Point where the line through `line0` and `line1` meets this plane.
    ///
    /// Returns `None` if the line is parallel to the plane or the plane is
    /// degenerate.
    pub fn intersect_line(&self, line0: Point3, line1: Point3) -> Option<Point3> {
        let normal = self.raw_normal();
        let line_vector = line1 - line0;
        let dot = normal.dot(line_vector);
        if dot.abs() <= EPSILON * normal.length() * line_vector.length() {
            return None;
        }
        let w = line0 - self.p0;
        let fraction = -normal.dot(w) / dot;
        Some(line0 + line_vector * fraction)
    }

    /// Z coordinate of the plane at `(x, y)`.
    ///
    /// Fails for vertical or degenerate planes.
    pub fn z_intersect(&self, x: f64, y: f64) -> GeometryResult<f64> {
        self.intersect_line(Point3::new(x, y, 0.0), Point3::new(x, y, 1.0))
            .map(|p| p.z)
            .ok_or_else(|| {
                GeometryError::degenerate_plane("cannot find Z intersect on a vertical plane")
            })
    }

    /// Returns a parallel plane moved `offset` units along the normal.
    pub fn shifted_along_normal(&self, offset: f64) -> GeometryResult<Plane> {
        let v = self.normal()? * offset;
        Ok(Plane::new(self.p0 + v, self.p1 + v, self.p2 + v))
    }

    /// Two points on the line where this plane meets `other`.
    ///
    /// Returns `None` if the planes are parallel.
    pub fn intersect_plane(&self, other: &Plane) -> Option<(Point3, Point3)> {
        let (first, second) = match self.intersect_line(other.p0, other.p1) {
            Some(p0) => {
                let p1 = self
                    .intersect_line(other.p0, other.p2)
                    .or_else(|| self.intersect_line(other.p1, other.p2));
                (p0, p1)
            }
            None => {
                let p0 = self.intersect_line(other.p0, other.p2)?;
                (p0, self.intersect_line(other.p1, other.p2))
            }
        };
        second.map(|p1| (first, p1))
    }

    /// X and Y tilt angles (radians) that align an object with this plane.
    ///
    /// A level plane (normal along Z) needs no rotation and yields `(0, 0)`.
    /// When the normal has no component in the relevant axis plane the tilt
    /// is a right angle.
    pub fn rotation_off_z(&self) -> GeometryResult<Point2> {
        let n = self.normal()?;
        let tilt = |a: f64| {
            let denom = (a * a + n.z * n.z).sqrt();
            if approx_zero(denom) {
                std::f64::consts::FRAC_PI_2
            } else {
                (n.z / denom).clamp(-1.0, 1.0).acos()
            }
        };
        Ok(Point2::new(tilt(n.y), tilt(n.x)))
    }
}

//! # 2D Lines
//!
//! Line helpers for laying out profiles in the plane: offsetting walls by a
//! thickness and finding where offset walls meet.

use config::constants::{approx_zero, EPSILON};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::vector::{Point2, VectorExt};

/// An infinite 2D line through two points, directed from `p0` to `p1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line2 {
    pub p0: Point2,
    pub p1: Point2,
}

impl Line2 {
    /// Creates a line through two points.
    pub fn new(p0: Point2, p1: Point2) -> Self {
        Self { p0, p1 }
    }

    /// Direction vector from `p0` to `p1`.
    #[inline]
    pub fn vector(&self) -> Point2 {
        self.p1 - self.p0
    }

    /// Distance between the two defining points.
    #[inline]
    pub fn length(&self) -> f64 {
        self.vector().length()
    }

    /// Unit normal, pointing to the right of the direction of travel.
    pub fn normal(&self) -> GeometryResult<Point2> {
        let v = self.vector();
        Point2::new(v.y, -v.x).unit()
    }

    /// Returns a parallel line moved `offset` units along the normal.
    pub fn shifted_along_normal(&self, offset: f64) -> GeometryResult<Line2> {
        let v = self.normal()? * offset;
        Ok(Line2::new(self.p0 + v, self.p1 + v))
    }

    /// Returns `(slope, intercept)` for `y = slope * x + intercept`.
    ///
    /// Fails with `VerticalLine` when the line is vertical.
    pub fn as_slope_intercept(&self) -> GeometryResult<(f64, f64)> {
        let dx = self.p1.x - self.p0.x;
        if approx_zero(dx) {
            return Err(GeometryError::vertical_line(format!(
                "line {} -> {} has no slope",
                self.p0, self.p1
            )));
        }
        let slope = (self.p1.y - self.p0.y) / dx;
        Ok((slope, self.p0.y - slope * self.p0.x))
    }

    /// Point where this line crosses `other`, or `None` if they are parallel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cad_math::{Line2, Point2};
    ///
    /// let a = Line2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
    /// let b = Line2::new(Point2::new(0.5, -1.0), Point2::new(0.5, 1.0));
    /// assert_eq!(a.intersect(&b), Some(Point2::new(0.5, 0.0)));
    /// ```
    pub fn intersect(&self, other: &Line2) -> Option<Point2> {
        let v = self.vector();
        let normal = Point2::new(v.y, -v.x);
        let other_v = other.vector();
        let dot = normal.dot(other_v);
        // Relative to both lengths so the test holds at any scale
        if dot.abs() <= EPSILON * normal.length() * other_v.length() {
            return None;
        }
        let w = other.p0 - self.p0;
        let fraction = -normal.dot(w) / dot;
        Some(other.p0 + other_v * fraction)
    }

    /// Unsigned angle to `other` in `[0, pi]`.
    pub fn angle(&self, other: &Line2) -> GeometryResult<f64> {
        self.vector().angle_to(other.vector())
    }

    /// Signed angle from this line to `other` in `(-pi, pi]`.
    ///
    /// Positive when `other` is counter-clockwise from this line.
    pub fn angle_full(&self, other: &Line2) -> f64 {
        let a = self.vector();
        let b = other.vector();
        a.perp_dot(b).atan2(a.dot(b))
    }
}

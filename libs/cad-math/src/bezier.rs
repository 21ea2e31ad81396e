//! # Bezier Curves
//!
//! Sampling of cubic Bezier curves into point sequences, typically used to
//! round off profile corners before lofting.

use crate::error::{GeometryError, GeometryResult};
use crate::vector::Point3;

/// Samples a cubic Bezier curve at `npoints` evenly spaced parameters.
///
/// The curve leaves `start` heading towards `ctrl0` and approaches `end`
/// from the direction of `ctrl1`. The first sample is exactly `start` and
/// the last is exactly `end`.
///
/// # Errors
///
/// `InvalidParameter` when `npoints < 2`.
///
/// # Example
///
/// ```rust
/// use cad_math::{cubic_bezier, Point3};
///
/// let pts = cubic_bezier(
///     5,
///     Point3::ZERO,
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
/// ).unwrap();
/// assert_eq!(pts.len(), 5);
/// assert_eq!(pts[0], Point3::ZERO);
/// assert_eq!(pts[4], Point3::new(1.0, 0.0, 0.0));
/// ```
pub fn cubic_bezier(
    npoints: usize,
    start: Point3,
    ctrl0: Point3,
    ctrl1: Point3,
    end: Point3,
) -> GeometryResult<Vec<Point3>> {
    if npoints < 2 {
        return Err(GeometryError::invalid_parameter(format!(
            "bezier needs at least 2 points, got {npoints}"
        )));
    }

    let tscale = 1.0 / (npoints - 1) as f64;
    let points = (0..npoints)
        .map(|idx| {
            let t = idx as f64 * tscale;
            let nt = 1.0 - t;
            start * (nt * nt * nt)
                + ctrl0 * (3.0 * nt * nt * t)
                + ctrl1 * (3.0 * nt * t * t)
                + end * (t * t * t)
        })
        .collect();
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_line_when_controls_on_segment() {
        let start = Point3::ZERO;
        let end = Point3::new(3.0, 0.0, 0.0);
        let pts = cubic_bezier(4, start, Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0), end)
            .unwrap();
        for (i, p) in pts.iter().enumerate() {
            assert!(p.abs_diff_eq(Point3::new(i as f64, 0.0, 0.0), 1e-12));
        }
    }

    #[test]
    fn test_midpoint() {
        let pts = cubic_bezier(
            3,
            Point3::ZERO,
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        )
        .unwrap();
        // B(0.5) = (s + 3c0 + 3c1 + e) / 8
        assert!(pts[1].abs_diff_eq(Point3::new(1.0, 1.5, 0.0), 1e-12));
    }

    #[test]
    fn test_too_few_points() {
        let r = cubic_bezier(1, Point3::ZERO, Point3::X, Point3::Y, Point3::Z);
        assert!(matches!(r, Err(GeometryError::InvalidParameter { .. })));
    }
}

//! Cube primitive.

#[cfg(test)]
mod tests;

use config::constants::DEFAULT_DEDUP_TOLERANCE;

use crate::builder::MeshBuilder;
use crate::error::{MeshError, MeshResult};
use crate::mesh::MeshData;

/// Creates a box of size `x * y * z` centered on the origin.
///
/// # Arguments
///
/// * `x`, `y`, `z` - Edge lengths, all positive.
///
/// # Errors
///
/// `InvalidParameter` for a non-finite size or one not above
/// `DEFAULT_DEDUP_TOLERANCE`.
///
/// # Example
///
/// ```rust
/// use cad_mesh::primitives::cube;
/// use glam::DVec3;
///
/// let c = cube(2.0, 2.0, 2.0).unwrap();
/// assert_eq!(c.vertex_count(), 8);
/// assert_eq!(c.face_count(), 6);
/// assert_eq!(c.bounding_box(), (DVec3::splat(-1.0), DVec3::splat(1.0)));
/// ```
pub fn cube(x: f64, y: f64, z: f64) -> MeshResult<MeshData> {
    for (axis, size) in [("x", x), ("y", y), ("z", z)] {
        if !size.is_finite() || size <= 0.0 {
            return Err(MeshError::invalid_parameter(format!(
                "cube {axis} size must be positive, got {size}"
            )));
        }
    }
    let (hx, hy, hz) = (x * 0.5, y * 0.5, z * 0.5);
    range_cube((-hx, hx), (-hy, hy), (-hz, hz))
}

/// Creates an axis-aligned box spanning the given `(min, max)` ranges.
///
/// # Errors
///
/// `InvalidParameter` when a range is not longer than
/// `DEFAULT_DEDUP_TOLERANCE`, since its corners would merge.
pub fn range_cube(
    x_range: (f64, f64),
    y_range: (f64, f64),
    z_range: (f64, f64),
) -> MeshResult<MeshData> {
    for (axis, (lo, hi)) in [("x", x_range), ("y", y_range), ("z", z_range)] {
        if !(lo.is_finite() && hi.is_finite() && hi - lo > DEFAULT_DEDUP_TOLERANCE) {
            return Err(MeshError::invalid_parameter(format!(
                "cube {axis} range must be longer than {DEFAULT_DEDUP_TOLERANCE}, got ({lo}, {hi})"
            )));
        }
    }
    let (x0, x1) = x_range;
    let (y0, y1) = y_range;
    let (z0, z1) = z_range;

    let mut mesh = MeshBuilder::new();
    let b_tl = mesh.add_xyz(x0, y1, z0);
    let b_tr = mesh.add_xyz(x1, y1, z0);
    let b_br = mesh.add_xyz(x1, y0, z0);
    let b_bl = mesh.add_xyz(x0, y0, z0);

    let t_tl = mesh.add_xyz(x0, y1, z1);
    let t_tr = mesh.add_xyz(x1, y1, z1);
    let t_br = mesh.add_xyz(x1, y0, z1);
    let t_bl = mesh.add_xyz(x0, y0, z1);

    // -Z, +Z, +X, -Y, -X, +Y
    mesh.add_quad(b_tr, b_br, b_bl, b_tl)?;
    mesh.add_quad(t_bl, t_br, t_tr, t_tl)?;
    mesh.add_quad(b_br, b_tr, t_tr, t_br)?;
    mesh.add_quad(b_bl, b_br, t_br, t_bl)?;
    mesh.add_quad(b_tl, b_bl, t_bl, t_tl)?;
    mesh.add_quad(b_tr, b_tl, t_tl, t_tr)?;

    Ok(mesh.finish())
}

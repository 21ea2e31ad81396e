//! Cylinder and cone primitives.

use config::constants::{clamp_rotation, MIN_SEGMENTS};

use crate::builder::MeshBuilder;
use crate::error::{MeshError, MeshResult};
use crate::mesh::MeshData;

/// Vertical extent of a cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Height {
    /// Total height, centered on z = 0
    Centered(f64),
    /// Explicit `(bottom, top)` z values
    Range(f64, f64),
}

impl Height {
    /// Returns `(bottom_z, top_z)`.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Height::Centered(h) => (-h * 0.5, h * 0.5),
            Height::Range(bottom, top) => (bottom, top),
        }
    }
}

impl From<f64> for Height {
    fn from(h: f64) -> Self {
        Height::Centered(h)
    }
}

/// Creates a cylinder (or frustum) around the Z axis.
///
/// The rim starts on +Y and turns clockwise viewed from +Z, toward +X. A
/// `rotation_degrees` below 360 produces a wedge whose two cut faces are
/// closed with radial quads through the axis; a 90 degree wedge fills the
/// +X/+Y quadrant.
///
/// # Arguments
///
/// * `radius` - Radius at the top.
/// * `height` - Centered height or explicit z range.
/// * `segments` - Radial segments over the swept angle.
/// * `rotation_degrees` - Swept angle; 360 or more is a full turn.
/// * `bottom_radius` - Radius at the bottom, `radius` when `None`.
///
/// # Errors
///
/// `InvalidParameter` for fewer than 3 segments, a non-positive height or
/// angle, a negative radius, or both radii zero.
///
/// # Example
///
/// ```rust
/// use cad_mesh::primitives::{cylinder, Height};
///
/// let c = cylinder(1.0, Height::Centered(2.0), 16, 360.0, None).unwrap();
/// assert_eq!(c.vertex_count(), 2 + 2 * 16);
/// assert_eq!(c.face_count(), 3 * 16);
/// ```
pub fn cylinder(
    radius: f64,
    height: Height,
    segments: u32,
    rotation_degrees: f64,
    bottom_radius: Option<f64>,
) -> MeshResult<MeshData> {
    let top_r = radius;
    let bottom_r = bottom_radius.unwrap_or(radius);
    let (bottom_z, top_z) = height.bounds();

    if segments < MIN_SEGMENTS {
        return Err(MeshError::invalid_parameter(format!(
            "cylinder needs at least {MIN_SEGMENTS} segments, got {segments}"
        )));
    }
    if !(bottom_z.is_finite() && top_z.is_finite() && bottom_z < top_z) {
        return Err(MeshError::invalid_parameter(format!(
            "cylinder height must be positive, got z range ({bottom_z}, {top_z})"
        )));
    }
    if !(top_r.is_finite() && bottom_r.is_finite()) || top_r < 0.0 || bottom_r < 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "cylinder radii must be non-negative, got {top_r} and {bottom_r}"
        )));
    }
    if top_r == 0.0 && bottom_r == 0.0 {
        return Err(MeshError::invalid_parameter("cylinder cannot have both radii zero"));
    }
    if !rotation_degrees.is_finite() || rotation_degrees <= 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "cylinder rotation must be positive, got {rotation_degrees}"
        )));
    }

    let (rotation, full_turn) = clamp_rotation(rotation_degrees);
    let end = if full_turn { segments } else { segments + 1 };
    let step = rotation.to_radians() / f64::from(segments);

    let mut mesh = MeshBuilder::new();
    let top_center = mesh.add_xyz(0.0, 0.0, top_z);
    let bottom_center = mesh.add_xyz(0.0, 0.0, bottom_z);

    let mut top = Vec::with_capacity(end as usize);
    let mut bottom = Vec::with_capacity(end as usize);
    for n in 0..end {
        let (sin, cos) = (step * f64::from(n)).sin_cos();
        top.push(mesh.add_xyz(sin * top_r, cos * top_r, top_z));
        bottom.push(mesh.add_xyz(sin * bottom_r, cos * bottom_r, bottom_z));
    }

    let count = top.len();
    let spans = if full_turn { count } else { count - 1 };
    // The rim runs clockwise, so faces list it backwards to face outward
    for idx in 0..spans {
        let next = (idx + 1) % count;
        mesh.add_tri(top_center, top[next], top[idx])?;
        mesh.add_tri(bottom_center, bottom[idx], bottom[next])?;
        mesh.add_quad(bottom[idx], top[idx], top[next], bottom[next])?;
    }

    if !full_turn {
        let last = count - 1;
        mesh.add_quad(top_center, top[0], bottom[0], bottom_center)?;
        mesh.add_quad(top_center, bottom_center, bottom[last], top[last])?;
    }

    Ok(mesh.finish())
}

/// Creates a cone with its base centered at `-h / 2` and apex at `h / 2`.
///
/// The apex ring collapses through dedup, so the sides are triangles.
///
/// # Errors
///
/// `InvalidParameter` for a non-positive radius, plus anything
/// [`cylinder`] reports.
pub fn cone(radius: f64, height: f64, segments: u32, rotation_degrees: f64) -> MeshResult<MeshData> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "cone radius must be positive, got {radius}"
        )));
    }
    cylinder(
        0.0,
        Height::Centered(height),
        segments,
        rotation_degrees,
        Some(radius),
    )
}

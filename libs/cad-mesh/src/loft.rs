//! # Loft
//!
//! Face generation between corresponding points of profile rings, plus the
//! two sweeps built on it: [`extrude`] and [`revolve`].
//!
//! ## Winding
//!
//! With the default [`Winding::CounterClockwise`], rings are expected to run
//! counter-clockwise when viewed from the last ring looking back towards the
//! first. Side faces then face away from the interior and caps face away
//! from the body. Rings authored the other way round can be lofted with
//! [`Winding::Clockwise`], which flips every emitted face.
//!
//! ## Faces
//!
//! For rings `a` and `b` and ring index `i`, the side face is
//! `[a_i, a_i+1, b_i+1, b_i]`, or the two triangles `[a_i, a_i+1, b_i+1]`
//! and `[a_i, b_i+1, b_i]`.

use cad_math::{Point2, Point3, Transformable, Transform, VectorExt};
use config::constants::{clamp_rotation, DEFAULT_DEDUP_TOLERANCE, DEFAULT_SEGMENTS, MIN_SEGMENTS};
use glam::DVec3;
use tracing::debug;

use crate::builder::{MeshBuilder, VertexId};
use crate::error::{MeshError, MeshResult};
use crate::mesh::MeshData;

// =============================================================================
// OPTIONS
// =============================================================================

/// Shape of the side faces between two rings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FaceStyle {
    /// One quad per ring segment
    #[default]
    Quads,
    /// Two triangles per ring segment
    Triangles,
}

/// Orientation the input rings are authored in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Winding {
    /// Rings run counter-clockwise viewed from the last ring
    #[default]
    CounterClockwise,
    /// Rings run clockwise viewed from the last ring; faces are flipped
    Clockwise,
}

/// Options for [`loft_rings`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoftOptions {
    /// Connect the last point of each ring back to the first
    pub closed: bool,
    /// Connect the last ring back to the first ring
    pub wrap: bool,
    /// Close the first and last rings with ngon caps
    pub caps: bool,
    /// Quads or triangle pairs
    pub style: FaceStyle,
    /// Orientation of the input rings
    pub winding: Winding,
    /// Dedup tolerance for the vertex table
    pub tolerance: f64,
}

impl Default for LoftOptions {
    fn default() -> Self {
        Self {
            closed: true,
            wrap: false,
            caps: false,
            style: FaceStyle::Quads,
            winding: Winding::CounterClockwise,
            tolerance: DEFAULT_DEDUP_TOLERANCE,
        }
    }
}

impl LoftOptions {
    /// Default options with caps enabled.
    pub fn capped() -> Self {
        Self {
            caps: true,
            ..Self::default()
        }
    }
}

// =============================================================================
// LOFT
// =============================================================================

/// Lofts between two rings of equal length.
///
/// # Errors
///
/// See [`loft_rings`].
///
/// # Example
///
/// ```rust
/// use cad_mesh::{loft, LoftOptions};
/// use glam::DVec3;
///
/// let a = [
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(1.0, 1.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
/// ];
/// let b = a.map(|p| p + DVec3::Z);
///
/// let mesh = loft(&a, &b, &LoftOptions::default()).unwrap();
/// assert_eq!(mesh.face_count(), 4);
/// assert_eq!(mesh.vertex_count(), 8);
/// ```
pub fn loft(a: &[Point3], b: &[Point3], options: &LoftOptions) -> MeshResult<MeshData> {
    loft_rings(&[a, b], options)
}

/// Lofts through a sequence of rings of equal length.
///
/// Ring `k` is connected to ring `k + 1`; with `wrap` the last ring is also
/// connected to the first. Inputs are validated before any face is built,
/// so a failure never leaves partial output.
///
/// # Errors
///
/// - `ShapeMismatch` if the rings have different lengths
/// - `InvalidParameter` for fewer than 2 rings, rings too short for the
///   closed/open mode, caps on open or wrapped rings, wrap with fewer than
///   3 rings, or an invalid tolerance
/// - `DegenerateFace` if a side face visits the same vertex twice after
///   dedup (self-intersecting rings)
pub fn loft_rings<R: AsRef<[Point3]>>(rings: &[R], options: &LoftOptions) -> MeshResult<MeshData> {
    validate_rings(rings, options)?;

    let mut builder = MeshBuilder::with_tolerance(options.tolerance)?;
    let ids: Vec<Vec<VertexId>> = rings
        .iter()
        .map(|ring| builder.add_points(ring.as_ref()))
        .collect();

    let n = ids[0].len();
    let segments = if options.closed { n } else { n - 1 };

    let mut pairs: Vec<(usize, usize)> = (0..ids.len() - 1).map(|k| (k, k + 1)).collect();
    if options.wrap {
        pairs.push((ids.len() - 1, 0));
    }

    for (ka, kb) in pairs {
        let (a, b) = (&ids[ka], &ids[kb]);
        for i in 0..segments {
            let j = (i + 1) % n;
            match options.style {
                FaceStyle::Quads => {
                    emit(&mut builder, &[a[i], a[j], b[j], b[i]], options.winding)?;
                }
                FaceStyle::Triangles => {
                    emit(&mut builder, &[a[i], a[j], b[j]], options.winding)?;
                    emit(&mut builder, &[a[i], b[j], b[i]], options.winding)?;
                }
            }
        }
    }

    if options.caps {
        let mut start = ids[0].clone();
        start.reverse();
        emit(&mut builder, &start, options.winding)?;
        if let Some(end) = ids.last() {
            emit(&mut builder, end, options.winding)?;
        }
    }

    debug!(
        rings = ids.len(),
        ring_len = n,
        vertices = builder.vertex_count(),
        faces = builder.face_count(),
        "loft complete"
    );
    Ok(builder.finish())
}

fn emit(builder: &mut MeshBuilder, face: &[VertexId], winding: Winding) -> MeshResult<()> {
    match winding {
        Winding::CounterClockwise => builder.add_face(face)?,
        Winding::Clockwise => {
            let flipped: Vec<VertexId> = face.iter().rev().copied().collect();
            builder.add_face(&flipped)?
        }
    };
    Ok(())
}

fn validate_rings<R: AsRef<[Point3]>>(rings: &[R], options: &LoftOptions) -> MeshResult<()> {
    let Some(first) = rings.first() else {
        return Err(MeshError::invalid_parameter("loft needs at least 2 rings, got 0"));
    };
    if rings.len() < 2 {
        return Err(MeshError::invalid_parameter("loft needs at least 2 rings, got 1"));
    }

    let n = first.as_ref().len();
    for (k, ring) in rings.iter().enumerate().skip(1) {
        let len = ring.as_ref().len();
        if len != n {
            return Err(MeshError::shape_mismatch(format!(
                "ring {k} has {len} points, ring 0 has {n}"
            )));
        }
    }

    let min_len = if options.closed { 3 } else { 2 };
    if n < min_len {
        return Err(MeshError::invalid_parameter(format!(
            "{} rings need at least {min_len} points, got {n}",
            if options.closed { "closed" } else { "open" }
        )));
    }
    if options.caps && !options.closed {
        return Err(MeshError::invalid_parameter("caps require closed rings"));
    }
    if options.caps && options.wrap {
        return Err(MeshError::invalid_parameter("a wrapped loft has no ends to cap"));
    }
    if options.wrap && rings.len() < 3 {
        return Err(MeshError::invalid_parameter(format!(
            "wrap needs at least 3 rings, got {}",
            rings.len()
        )));
    }
    Ok(())
}

// =============================================================================
// EXTRUDE
// =============================================================================

/// Extrudes a closed profile along `offset`, producing a capped solid.
///
/// The profile should run counter-clockwise when viewed from the far end
/// (looking back along `-offset`).
///
/// # Errors
///
/// `InvalidParameter` for a zero offset, plus anything [`loft_rings`]
/// reports for the profile.
///
/// # Example
///
/// ```rust
/// use cad_mesh::extrude;
/// use config::constants::DEFAULT_DEDUP_TOLERANCE;
/// use glam::DVec3;
///
/// let tri = [DVec3::ZERO, DVec3::X, DVec3::Y];
/// let prism = extrude(&tri, DVec3::new(0.0, 0.0, 2.0), DEFAULT_DEDUP_TOLERANCE).unwrap();
/// assert_eq!(prism.face_count(), 5);
/// ```
pub fn extrude(profile: &[Point3], offset: DVec3, tolerance: f64) -> MeshResult<MeshData> {
    if offset.is_degenerate() {
        return Err(MeshError::invalid_parameter("extrude offset must be non-zero"));
    }
    let far = profile.transformed(&Transform::identity().translate_by(offset));
    let options = LoftOptions {
        tolerance,
        ..LoftOptions::capped()
    };
    loft_rings(&[profile, far.as_slice()], &options)
}

// =============================================================================
// REVOLVE
// =============================================================================

/// Parameters for [`revolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevolveParams {
    /// Angular subdivisions over the swept angle
    pub segments: u32,
    /// Swept angle in degrees; 360 or more is a full turn
    pub degrees: f64,
    /// Whether the profile is a closed outline
    pub closed: bool,
    /// Dedup tolerance for the vertex table
    pub tolerance: f64,
}

impl Default for RevolveParams {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            degrees: 360.0,
            closed: true,
            tolerance: DEFAULT_DEDUP_TOLERANCE,
        }
    }
}

/// Revolves an `(r, z)` profile about the +Z axis.
///
/// The sweep starts in the XZ plane and turns counter-clockwise viewed from
/// +Z. A counter-clockwise profile (in the `(r, z)` plane) produces outward
/// faces. Full turns wrap around; partial turns of a closed profile are
/// capped at both ends. Profile points on the axis (`r == 0`) collapse
/// through dedup into a single vertex.
///
/// # Errors
///
/// `InvalidParameter` for fewer than `MIN_SEGMENTS` segments, a non-positive
/// angle, or a negative radius.
///
/// # Example
///
/// ```rust
/// use cad_mesh::{revolve, RevolveParams};
/// use glam::DVec2;
///
/// let square = [
///     DVec2::new(1.0, 0.0),
///     DVec2::new(2.0, 0.0),
///     DVec2::new(2.0, 1.0),
///     DVec2::new(1.0, 1.0),
/// ];
/// let ring = revolve(&square, &RevolveParams { segments: 8, ..Default::default() }).unwrap();
/// assert_eq!(ring.vertex_count(), 32);
/// assert_eq!(ring.face_count(), 32);
/// ```
pub fn revolve(profile: &[Point2], params: &RevolveParams) -> MeshResult<MeshData> {
    if params.segments < MIN_SEGMENTS {
        return Err(MeshError::invalid_parameter(format!(
            "revolve needs at least {MIN_SEGMENTS} segments, got {}",
            params.segments
        )));
    }
    if !params.degrees.is_finite() || params.degrees <= 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "revolve angle must be positive, got {}",
            params.degrees
        )));
    }
    if let Some(p) = profile.iter().find(|p| p.x < 0.0) {
        return Err(MeshError::invalid_parameter(format!(
            "revolve profile radius must be non-negative, got {}",
            p.x
        )));
    }

    let (degrees, full_turn) = clamp_rotation(params.degrees);
    let step = degrees.to_radians() / f64::from(params.segments);
    let ring_count = if full_turn {
        params.segments
    } else {
        params.segments + 1
    };

    // Reversed so that a CCW (r, z) profile lofts with outward faces
    let rings: Vec<Vec<Point3>> = (0..ring_count)
        .rev()
        .map(|k| {
            let (sin, cos) = (f64::from(k) * step).sin_cos();
            profile
                .iter()
                .map(|p| Point3::new(p.x * cos, p.x * sin, p.y))
                .collect()
        })
        .collect();

    let options = LoftOptions {
        closed: params.closed,
        wrap: full_turn,
        caps: !full_turn && params.closed,
        style: FaceStyle::Quads,
        winding: Winding::CounterClockwise,
        tolerance: params.tolerance,
    };
    loft_rings(&rings, &options)
}

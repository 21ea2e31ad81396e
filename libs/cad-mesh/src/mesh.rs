//! # Mesh Data Structure
//!
//! A vertex table plus a list of ngon faces indexing into it. This pair is
//! what every builder in the crate produces and what a [`MeshSink`]
//! consumes.
//!
//! Invariants (checked by [`MeshData::from_parts`] and upheld by the
//! builder):
//! - every face has at least 3 indices
//! - every index is within the vertex table
//! - no face repeats a vertex
//!
//! Faces wind counter-clockwise when viewed from outside the solid.
//! Planarity of ngons is the caller's responsibility.
//!
//! [`MeshSink`]: crate::sink::MeshSink

use cad_math::{Point3, VectorExt};
use serde::Serialize;

use crate::error::{MeshError, MeshResult};

/// Vertex table plus face list.
///
/// # Example
///
/// ```rust
/// use cad_mesh::MeshData;
/// use glam::DVec3;
///
/// let mesh = MeshData::from_parts(
///     vec![DVec3::ZERO, DVec3::X, DVec3::Y],
///     vec![vec![0, 1, 2]],
/// ).unwrap();
/// assert_eq!(mesh.face_normal(0).unwrap(), DVec3::Z);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeshData {
    /// Vertex positions
    vertices: Vec<Point3>,
    /// Faces as ordered vertex indices (3 or more per face)
    faces: Vec<Vec<u32>>,
}

impl MeshData {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh from a vertex table and face list, validating both.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if a face references a missing vertex
    /// - `DegenerateFace` if a face has fewer than 3 indices or repeats one
    pub fn from_parts(vertices: Vec<Point3>, faces: Vec<Vec<u32>>) -> MeshResult<Self> {
        let mesh = Self { vertices, faces };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Assembles a mesh whose invariants the caller already guarantees.
    pub(crate) fn from_parts_unchecked(vertices: Vec<Point3>, faces: Vec<Vec<u32>>) -> Self {
        Self { vertices, faces }
    }

    /// Splits the mesh into its vertex table and face list.
    pub fn into_parts(self) -> (Vec<Point3>, Vec<Vec<u32>>) {
        (self.vertices, self.faces)
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the number of triangles a fan triangulation would produce.
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|f| f.len() - 2).sum()
    }

    /// Returns true if the mesh has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Returns a reference to the faces.
    #[inline]
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> Option<Point3> {
        self.vertices.get(index as usize).copied()
    }

    /// Returns the face at the given index.
    #[inline]
    pub fn face(&self, index: usize) -> Option<&[u32]> {
        self.faces.get(index).map(Vec::as_slice)
    }

    /// Unit normal of a face, computed with Newell's method.
    ///
    /// Robust for non-triangular and slightly non-planar faces. For a
    /// counter-clockwise face the normal points outward.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a missing face, `Geometry` when the face has
    /// zero area.
    pub fn face_normal(&self, index: usize) -> MeshResult<Point3> {
        let face = self.face(index).ok_or_else(|| {
            MeshError::invalid_parameter(format!(
                "face {index} does not exist (face count {})",
                self.faces.len()
            ))
        })?;

        let mut normal = Point3::ZERO;
        for (i, &a) in face.iter().enumerate() {
            let b = face[(i + 1) % face.len()];
            let va = self.vertices[a as usize];
            let vb = self.vertices[b as usize];
            normal.x += (va.y - vb.y) * (va.z + vb.z);
            normal.y += (va.z - vb.z) * (va.x + vb.x);
            normal.z += (va.x - vb.x) * (va.y + vb.y);
        }
        Ok(normal.unit()?)
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (Point3, Point3) {
        let Some((first, rest)) = self.vertices.split_first() else {
            return (Point3::ZERO, Point3::ZERO);
        };
        rest.iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Appends another mesh, offsetting its face indices.
    ///
    /// Vertices are not welded; use a [`MeshBuilder`] for that.
    ///
    /// [`MeshBuilder`]: crate::builder::MeshBuilder
    pub fn merge(&mut self, other: &MeshData) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|face| face.iter().map(|i| i + offset).collect()),
        );
    }

    /// Returns a copy with every face's winding reversed.
    pub fn reversed(&self) -> MeshData {
        let faces = self
            .faces
            .iter()
            .map(|face| face.iter().rev().copied().collect())
            .collect();
        Self::from_parts_unchecked(self.vertices.clone(), faces)
    }

    /// Returns a copy with every face split into a triangle fan.
    ///
    /// Winding is preserved. Correct for convex faces; concave faces need
    /// to be split by the caller first.
    pub fn triangulated(&self) -> MeshData {
        let mut faces = Vec::with_capacity(self.triangle_count());
        for face in &self.faces {
            for i in 1..face.len() - 1 {
                faces.push(vec![face[0], face[i], face[i + 1]]);
            }
        }
        Self::from_parts_unchecked(self.vertices.clone(), faces)
    }

    /// Validates the mesh invariants.
    pub fn validate(&self) -> MeshResult<()> {
        let count = self.vertices.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(MeshError::degenerate_face(format!(
                    "face {face_idx} has {} vertices, at least 3 required",
                    face.len()
                )));
            }
            for (i, &index) in face.iter().enumerate() {
                if index as usize >= count {
                    return Err(MeshError::IndexOutOfRange {
                        face: face_idx,
                        index,
                        count,
                    });
                }
                if face[..i].contains(&index) {
                    return Err(MeshError::degenerate_face(format!(
                        "face {face_idx} repeats vertex {index}"
                    )));
                }
            }
        }
        Ok(())
    }
}

//! # Mesh Builder
//!
//! Accumulates points and faces into a deduplicated vertex table.
//!
//! ## Deduplication
//!
//! Points within `tolerance` of an existing vertex reuse that vertex; the
//! first point seen keeps its position. Lookups go through a uniform grid
//! with cell size equal to the tolerance, so only the 27 neighbouring cells
//! are searched. A tolerance of zero merges exactly equal coordinates only.
//!
//! Dedup is deterministic: the same points in the same order always produce
//! the same vertex table.
//!
//! ## Collapsed Faces
//!
//! When dedup merges neighbouring corners of a face (a cone apex, a profile
//! point on the revolution axis) the repeated index is dropped from the face.
//! A face left with fewer than 3 vertices is skipped rather than emitted.

use std::collections::HashMap;

use cad_math::{Point3, VectorExt};
use config::constants::DEFAULT_DEDUP_TOLERANCE;
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::mesh::MeshData;

/// Handle to a vertex in a [`MeshBuilder`]'s table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(u32);

impl VertexId {
    /// Index into the vertex table.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Grid cell key: quantized coordinates, or raw bits for exact matching.
type CellKey = [i64; 3];

/// Builds a [`MeshData`] from points and faces.
///
/// # Example
///
/// ```rust
/// use cad_mesh::MeshBuilder;
///
/// let mut builder = MeshBuilder::new();
/// let a = builder.add_xyz(0.0, 0.0, 0.0);
/// let b = builder.add_xyz(1.0, 0.0, 0.0);
/// let c = builder.add_xyz(0.0, 1.0, 0.0);
/// // Within tolerance of `a`, so it is the same vertex
/// let a2 = builder.add_xyz(0.00001, 0.0, 0.0);
/// assert_eq!(a, a2);
///
/// builder.add_tri(a, b, c).unwrap();
/// let mesh = builder.finish();
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    tolerance: f64,
    vertices: Vec<Point3>,
    grid: HashMap<CellKey, Vec<u32>>,
    faces: Vec<Vec<u32>>,
    dropped_faces: usize,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuilder {
    /// Creates a builder using `DEFAULT_DEDUP_TOLERANCE`.
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_DEDUP_TOLERANCE,
            vertices: Vec::new(),
            grid: HashMap::new(),
            faces: Vec::new(),
            dropped_faces: 0,
        }
    }

    /// Creates a builder with an explicit dedup tolerance.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a negative or non-finite tolerance.
    pub fn with_tolerance(tolerance: f64) -> MeshResult<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(MeshError::invalid_parameter(format!(
                "dedup tolerance must be finite and non-negative: {tolerance}"
            )));
        }
        Ok(Self {
            tolerance,
            ..Self::new()
        })
    }

    /// Returns the dedup tolerance.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the number of distinct vertices so far.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces so far.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the number of faces skipped because dedup collapsed them.
    #[inline]
    pub fn dropped_faces(&self) -> usize {
        self.dropped_faces
    }

    /// Returns the position stored for a vertex.
    pub fn position(&self, id: VertexId) -> Option<Point3> {
        self.vertices.get(id.0 as usize).copied()
    }

    fn cell_of(&self, p: Point3) -> CellKey {
        if self.tolerance > 0.0 {
            // `as` saturates at the i64 range; saturated cells still hold
            // every neighbour, only less selectively
            let q = (p / self.tolerance).floor();
            [q.x as i64, q.y as i64, q.z as i64]
        } else {
            // +0.0 folds -0.0 into 0.0 so both land in one cell
            [
                (p.x + 0.0).to_bits() as i64,
                (p.y + 0.0).to_bits() as i64,
                (p.z + 0.0).to_bits() as i64,
            ]
        }
    }

    fn find_existing(&self, p: Point3) -> Option<u32> {
        let cell = self.cell_of(p);
        let reach: i64 = if self.tolerance > 0.0 { 1 } else { 0 };

        let mut best: Option<u32> = None;
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                for dz in -reach..=reach {
                    let key = [
                        cell[0].saturating_add(dx),
                        cell[1].saturating_add(dy),
                        cell[2].saturating_add(dz),
                    ];
                    let Some(ids) = self.grid.get(&key) else {
                        continue;
                    };
                    for &id in ids {
                        if self.vertices[id as usize].within(p, self.tolerance)
                            && best.map_or(true, |b| id < b)
                        {
                            best = Some(id);
                        }
                    }
                }
            }
        }
        best
    }

    /// Adds a point, returning the existing vertex if one is within tolerance.
    pub fn add_point(&mut self, p: Point3) -> VertexId {
        if let Some(id) = self.find_existing(p) {
            return VertexId(id);
        }
        let id = self.vertices.len() as u32;
        self.vertices.push(p);
        let cell = self.cell_of(p);
        self.grid.entry(cell).or_default().push(id);
        VertexId(id)
    }

    /// Adds a point from coordinates.
    pub fn add_xyz(&mut self, x: f64, y: f64, z: f64) -> VertexId {
        self.add_point(Point3::new(x, y, z))
    }

    /// Adds a sequence of points, returning their vertex handles in order.
    pub fn add_points(&mut self, points: &[Point3]) -> Vec<VertexId> {
        points.iter().map(|p| self.add_point(*p)).collect()
    }

    /// Adds a face from vertex handles.
    ///
    /// Consecutive repeats (including last-to-first) left by dedup are
    /// removed. Returns the new face index, or `None` if the face collapsed
    /// below 3 vertices and was skipped.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` for a handle that is not in this builder's table
    /// - `DegenerateFace` when a vertex repeats non-consecutively
    pub fn add_face(&mut self, ids: &[VertexId]) -> MeshResult<Option<usize>> {
        let count = self.vertices.len();
        let face_idx = self.faces.len();

        let mut face: Vec<u32> = Vec::with_capacity(ids.len());
        for id in ids {
            if id.0 as usize >= count {
                return Err(MeshError::IndexOutOfRange {
                    face: face_idx,
                    index: id.0,
                    count,
                });
            }
            if face.last() != Some(&id.0) {
                face.push(id.0);
            }
        }
        while face.len() > 1 && face.first() == face.last() {
            face.pop();
        }

        if face.len() < 3 {
            self.dropped_faces += 1;
            debug!(
                requested = ids.len(),
                remaining = face.len(),
                "skipping face collapsed by dedup"
            );
            return Ok(None);
        }

        for (i, index) in face.iter().enumerate() {
            if face[..i].contains(index) {
                return Err(MeshError::degenerate_face(format!(
                    "face {face_idx} visits vertex {index} twice"
                )));
            }
        }

        self.faces.push(face);
        Ok(Some(face_idx))
    }

    /// Adds a triangle.
    pub fn add_tri(&mut self, a: VertexId, b: VertexId, c: VertexId) -> MeshResult<Option<usize>> {
        self.add_face(&[a, b, c])
    }

    /// Adds a quad.
    pub fn add_quad(
        &mut self,
        a: VertexId,
        b: VertexId,
        c: VertexId,
        d: VertexId,
    ) -> MeshResult<Option<usize>> {
        self.add_face(&[a, b, c, d])
    }

    /// Adds a fan of triangles `(center, points[i-1], points[i])`.
    pub fn add_fan(&mut self, center: VertexId, points: &[VertexId]) -> MeshResult<()> {
        for pair in points.windows(2) {
            self.add_tri(center, pair[0], pair[1])?;
        }
        Ok(())
    }

    /// Adds every vertex and face of an existing mesh, welding coincident
    /// vertices with those already in the builder.
    pub fn add_mesh(&mut self, mesh: &MeshData) -> MeshResult<()> {
        let ids = self.add_points(mesh.vertices());
        for face in mesh.faces() {
            let mapped: Vec<VertexId> = face.iter().map(|&i| ids[i as usize]).collect();
            self.add_face(&mapped)?;
        }
        Ok(())
    }

    /// Finishes the build, returning the vertex table and face list.
    pub fn finish(self) -> MeshData {
        debug!(
            vertices = self.vertices.len(),
            faces = self.faces.len(),
            dropped = self.dropped_faces,
            "mesh built"
        );
        MeshData::from_parts_unchecked(self.vertices, self.faces)
    }
}

//! # Mesh Transforms
//!
//! Applies a [`Transform`] to every vertex of a mesh. When the transform
//! flips handedness, faces are reversed so they keep facing outward.

use cad_math::{GeometryResult, Point3, Transform, Transformable};
use glam::DVec3;

use crate::mesh::MeshData;

impl Transformable for MeshData {
    type Output = MeshData;

    fn transformed(&self, transform: &Transform) -> MeshData {
        let vertices = self.vertices().transformed(transform);
        let faces = if transform.reverses_orientation() {
            self.faces()
                .iter()
                .map(|face| face.iter().rev().copied().collect())
                .collect()
        } else {
            self.faces().to_vec()
        };
        MeshData::from_parts_unchecked(vertices, faces)
    }
}

impl MeshData {
    /// Returns a translated copy.
    pub fn translated(&self, x: f64, y: f64, z: f64) -> MeshData {
        self.transformed(&Transform::identity().translate(x, y, z))
    }

    /// Returns a copy rotated by `angle` radians about an axis through
    /// `center`.
    ///
    /// # Errors
    ///
    /// `DegenerateVector` when `axis` has zero length.
    pub fn rotated_about_axis(
        &self,
        axis: DVec3,
        angle: f64,
        center: Point3,
    ) -> GeometryResult<MeshData> {
        let transform = Transform::identity().rotate_about_axis(axis, angle, center)?;
        Ok(self.transformed(&transform))
    }

    /// Returns a copy scaled about the origin.
    pub fn scaled(&self, x: f64, y: f64, z: f64) -> MeshData {
        self.transformed(&Transform::identity().scale(x, y, z))
    }

    /// Returns a copy mirrored across the YZ plane.
    pub fn mirrored_x(&self) -> MeshData {
        self.transformed(&Transform::identity().mirror_x())
    }
}

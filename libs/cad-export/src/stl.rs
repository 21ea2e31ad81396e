//! STL (Stereolithography) writers.
//!
//! Ngon faces are fan-triangulated on the way out; winding is preserved so
//! counter-clockwise faces stay outward. Facet normals are computed per
//! triangle and written as zero for zero-area triangles.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```

use std::io::{self, Write};

use cad_math::{Point3, VectorExt};
use cad_mesh::MeshData;
use config::constants::STL_HEADER_SIZE;

/// Iterates the fan triangulation of every face as vertex positions.
fn triangles(mesh: &MeshData) -> impl Iterator<Item = [Point3; 3]> + '_ {
    let v = mesh.vertices();
    mesh.faces().iter().flat_map(move |face| {
        (1..face.len() - 1).map(move |i| {
            [
                v[face[0] as usize],
                v[face[i] as usize],
                v[face[i + 1] as usize],
            ]
        })
    })
}

fn facet_normal([a, b, c]: [Point3; 3]) -> Point3 {
    // Adding zero turns -0.0 into 0.0
    (b - a).cross(c - a).unit().unwrap_or(Point3::ZERO) + Point3::ZERO
}

/// Writes `mesh` as binary STL.
///
/// The header carries `name`, truncated to fit and padded with spaces.
pub fn write_binary<W: Write>(mesh: &MeshData, name: &str, mut writer: W) -> io::Result<()> {
    let mut header = [b' '; STL_HEADER_SIZE];
    let text = format!("cad-export {name}");
    let len = text.len().min(STL_HEADER_SIZE);
    header[..len].copy_from_slice(&text.as_bytes()[..len]);
    writer.write_all(&header)?;

    let count = u32::try_from(mesh.triangle_count())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many triangles for STL"))?;
    writer.write_all(&count.to_le_bytes())?;

    for tri in triangles(mesh) {
        let normal = facet_normal(tri);
        for p in std::iter::once(normal).chain(tri) {
            // STL stores f32
            writer.write_all(&(p.x as f32).to_le_bytes())?;
            writer.write_all(&(p.y as f32).to_le_bytes())?;
            writer.write_all(&(p.z as f32).to_le_bytes())?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }
    writer.flush()
}

/// Writes `mesh` as ASCII STL under the solid name `name`.
pub fn write_ascii<W: Write>(mesh: &MeshData, name: &str, mut writer: W) -> io::Result<()> {
    writeln!(writer, "solid {name}")?;
    for tri in triangles(mesh) {
        let n = facet_normal(tri);
        writeln!(writer, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in tri {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {name}")?;
    writer.flush()
}

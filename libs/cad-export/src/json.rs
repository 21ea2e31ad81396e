//! JSON mesh output.
//!
//! Writes the vertex table and face list as-is:
//!
//! ```json
//! { "vertices": [[x, y, z], ...], "faces": [[0, 1, 2, 3], ...] }
//! ```

use std::io::Write;

use cad_mesh::MeshData;

/// Writes `mesh` as pretty-printed JSON.
pub fn write_json<W: Write>(mesh: &MeshData, writer: W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, mesh)
}

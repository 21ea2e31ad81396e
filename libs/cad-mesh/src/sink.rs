//! # Mesh Sinks
//!
//! The consumer side of model generation. A sink receives finished meshes by
//! name; the live-reload loop clears it before each regeneration so stale
//! output never survives a rebuild.

use std::collections::BTreeMap;
use std::convert::Infallible;

use tracing::debug;

use crate::mesh::MeshData;

/// Receives finished meshes.
pub trait MeshSink {
    /// Error reported by the sink.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Discards everything previously ingested.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Accepts a finished mesh under `name`, replacing any mesh already
    /// stored under that name.
    fn ingest(&mut self, name: &str, mesh: MeshData) -> Result<(), Self::Error>;
}

/// In-memory sink keyed by object name.
///
/// # Example
///
/// ```rust
/// use cad_mesh::{MemorySink, MeshData, MeshSink};
///
/// let mut sink = MemorySink::new();
/// sink.ingest("part", MeshData::new()).unwrap();
/// assert!(sink.get("part").is_some());
///
/// sink.clear().unwrap();
/// assert!(sink.is_empty());
/// assert_eq!(sink.generation(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    meshes: BTreeMap<String, MeshData>,
    generation: u64,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the sink has been cleared.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, name: &str) -> Option<&MeshData> {
        self.meshes.get(name)
    }

    /// Object names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.meshes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl MeshSink for MemorySink {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Infallible> {
        self.meshes.clear();
        self.generation += 1;
        Ok(())
    }

    fn ingest(&mut self, name: &str, mesh: MeshData) -> Result<(), Infallible> {
        debug!(
            name,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "ingested mesh"
        );
        self.meshes.insert(name.to_string(), mesh);
        Ok(())
    }
}

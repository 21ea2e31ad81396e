//! # CAD Mesh
//!
//! Vertex table + face list construction for models authored as code.
//! Points go in, a deduplicated [`MeshData`] comes out.
//!
//! ## Architecture
//!
//! ```text
//! cad-math (Point3, Transform) → cad-mesh (MeshBuilder, loft, primitives) → MeshSink
//! ```
//!
//! ## Building Blocks
//!
//! - **Builder**: tolerance-based vertex dedup, ngon faces, collapsed-face cleanup
//! - **Loft**: side faces between equal-length rings, with caps and wrap
//! - **Sweeps**: extrude and revolve on top of loft
//! - **Primitives**: cube, cylinder, cone
//! - **Sinks**: the interface finished meshes are handed to
//!
//! ## Usage
//!
//! ```rust
//! use cad_mesh::{loft, LoftOptions};
//! use glam::DVec3;
//!
//! let bottom = [
//!     DVec3::new(0.0, 0.0, 0.0),
//!     DVec3::new(1.0, 0.0, 0.0),
//!     DVec3::new(1.0, 1.0, 0.0),
//!     DVec3::new(0.0, 1.0, 0.0),
//! ];
//! let top = bottom.map(|p| p + DVec3::Z);
//!
//! let solid = loft(&bottom, &top, &LoftOptions::capped()).unwrap();
//! assert_eq!(solid.face_count(), 6);
//! ```

pub mod builder;
pub mod error;
pub mod loft;
pub mod mesh;
pub mod primitives;
pub mod sink;
pub mod transform;

pub use builder::{MeshBuilder, VertexId};
pub use error::{MeshError, MeshResult};
pub use loft::{extrude, loft, loft_rings, revolve, FaceStyle, LoftOptions, RevolveParams, Winding};
pub use mesh::MeshData;
pub use sink::{MemorySink, MeshSink};

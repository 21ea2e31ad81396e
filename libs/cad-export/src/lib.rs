//! # CAD Export
//!
//! Turns CAD models authored as code into files on disk.
//!
//! ## Architecture
//!
//! ```text
//! ModelGenerator → ModelRegistry → export_models → stl / json writers
//!                                ↘ DevLoop (watch files) → MeshSink
//! ```
//!
//! A model is any [`ModelGenerator`]: code that builds one or more named
//! [`MeshData`](cad_mesh::MeshData) objects. Generators are registered once
//! and exported on demand; the live-reload loop rebuilds one model whenever
//! its input files change.
//!
//! ## Usage
//!
//! ```rust
//! use cad_export::{export_models, ExportFormat, ModelRegistry};
//! use cad_mesh::primitives::cube;
//!
//! let mut registry = ModelRegistry::new();
//! registry.register_fn("block", || Ok(cube(10.0, 10.0, 10.0)?)).unwrap();
//!
//! let dir = std::env::temp_dir().join("cad-export-doc");
//! let written = export_models(&registry, &[], &dir, ExportFormat::Binary).unwrap();
//! assert_eq!(written, vec![dir.join("block.stl")]);
//! ```

pub mod cli;
pub mod demo;
pub mod error;
pub mod export;
pub mod json;
pub mod registry;
pub mod stl;
pub mod watch;

pub use error::{ExportError, ExportResult};
pub use export::{export_models, ExportFormat};
pub use registry::{GeneratedObjects, ModelGenerator, ModelRegistry, SimpleGenerator};
pub use watch::{DevLoop, FileWatcher, StlDirSink};

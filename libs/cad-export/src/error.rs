//! # Export Errors
//!
//! Error types for the registry, writers, and live-reload loop.

use std::path::PathBuf;

use cad_math::GeometryError;
use cad_mesh::MeshError;
use thiserror::Error;

/// Errors that can occur while registering, generating, or exporting models.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Two generators claim the same object name
    #[error("Multiple generators specified for object {name}")]
    DuplicateModel { name: String },

    /// Requested names are not in the registry
    #[error("Unknown model: {}", names.join(", "))]
    UnknownModel { names: Vec<String> },

    /// A generator produced a different set of objects than it declared
    #[error("Generator did not produce the expected objects: {generated:?} != {expected:?}")]
    UnexpectedObjects {
        generated: Vec<String>,
        expected: Vec<String>,
    },

    /// Model code rejected its inputs
    #[error("Failed to generate {model}: {message}")]
    Generation { model: String, message: String },

    /// A sink refused a mesh
    #[error("Sink error: {message}")]
    Sink { message: String },

    /// Filesystem failure
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parameter file or JSON output failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl ExportError {
    /// Creates a generation error for `model`.
    pub fn generation(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generation {
            model: model.into(),
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it happened at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a sink error.
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink {
            message: message.into(),
        }
    }
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_model_lists_names() {
        let err = ExportError::UnknownModel {
            names: vec!["a".into(), "b".into()],
        };
        assert_eq!(err.to_string(), "Unknown model: a, b");
    }

    #[test]
    fn test_mesh_error_converts() {
        let err: ExportError = MeshError::shape_mismatch("ring 1 has 3 points").into();
        assert!(matches!(err, ExportError::Mesh(MeshError::ShapeMismatch { .. })));
        assert_eq!(err.to_string(), "Shape mismatch: ring 1 has 3 points");
    }
}

//! # Mesh Errors
//!
//! Error types for mesh construction. These are programmer-input errors:
//! they are reported by the call that detects them and nothing is retried.

use cad_math::GeometryError;
use thiserror::Error;

/// Errors that can occur while building or validating meshes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// Error from an underlying vector/plane/transform calculation
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Ring lengths disagree where a one-to-one correspondence is required
    #[error("Shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// A face references a vertex beyond the vertex table
    #[error("Index out of range: face {face} references vertex {index} (vertex count {count})")]
    IndexOutOfRange { face: usize, index: u32, count: usize },

    /// A face repeats a vertex or has fewer than 3 vertices
    #[error("Degenerate face: {message}")]
    DegenerateFace { message: String },

    /// Parameter outside its valid range
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },
}

impl MeshError {
    /// Creates a shape mismatch error.
    pub fn shape_mismatch(message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            message: message.into(),
        }
    }

    /// Creates a degenerate face error.
    pub fn degenerate_face(message: impl Into<String>) -> Self {
        Self::DegenerateFace {
            message: message.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

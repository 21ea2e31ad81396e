//! # Geometry Errors
//!
//! Error types for vector, plane, line, and transform operations.
//!
//! ## Error Policy
//!
//! - Errors are reported by the call that detects them
//! - No fallback values for degenerate input
//! - Every error carries a message naming the failing operation

use thiserror::Error;

/// Errors that can occur during geometry calculations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Normalization, cross product, or angle requested on a zero-length vector.
    #[error("Degenerate vector: {message}")]
    DegenerateVector { message: String },

    /// Plane defined by three collinear (or coincident) points.
    #[error("Degenerate plane: {message}")]
    DegeneratePlane { message: String },

    /// A vertical 2D line has no slope/intercept form.
    #[error("Vertical line: {message}")]
    VerticalLine { message: String },

    /// Transform cannot be inverted (a zero scale factor).
    #[error("Singular transform: {message}")]
    SingularTransform { message: String },

    /// Parameter outside its valid range.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },
}

impl GeometryError {
    /// Creates a degenerate vector error.
    pub fn degenerate_vector(message: impl Into<String>) -> Self {
        Self::DegenerateVector {
            message: message.into(),
        }
    }

    /// Creates a degenerate plane error.
    pub fn degenerate_plane(message: impl Into<String>) -> Self {
        Self::DegeneratePlane {
            message: message.into(),
        }
    }

    /// Creates a vertical line error.
    pub fn vertical_line(message: impl Into<String>) -> Self {
        Self::VerticalLine {
            message: message.into(),
        }
    }

    /// Creates a singular transform error.
    pub fn singular_transform(message: impl Into<String>) -> Self {
        Self::SingularTransform {
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

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

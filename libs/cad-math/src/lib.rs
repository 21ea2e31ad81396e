//! # CAD Math
//!
//! Point/vector primitives and affine transforms for authoring models as
//! code. Everything here is a pure value operation: nothing is mutated in
//! place and there is no shared state.
//!
//! ## Architecture
//!
//! ```text
//! cad-math (Point3, Transform, Plane, Line2) → cad-mesh (MeshBuilder, loft) → sinks
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use cad_math::{Point3, Transform, Transformable, VectorExt};
//!
//! let ring = vec![Point3::ZERO, Point3::X, Point3::Y];
//! let lifted = ring.transformed(&Transform::identity().translate(0.0, 0.0, 5.0));
//! assert_eq!(lifted[1], Point3::new(1.0, 0.0, 5.0));
//!
//! let dir = (lifted[1] - lifted[0]).unit().unwrap();
//! assert_eq!(dir, Point3::X);
//! ```

pub mod bezier;
pub mod error;
pub mod line;
pub mod plane;
pub mod transform;
pub mod vector;

pub use bezier::cubic_bezier;
pub use error::{GeometryError, GeometryResult};
pub use line::Line2;
pub use plane::Plane;
pub use transform::{Rotation, Transform, Transformable};
pub use vector::{Point2, Point3, Point3Ext, VectorExt};

//! # Primitive Solids
//!
//! Closed solids built directly with a [`MeshBuilder`]. All faces wind
//! counter-clockwise viewed from outside.
//!
//! [`MeshBuilder`]: crate::builder::MeshBuilder

pub mod cube;
pub mod cylinder;

pub use cube::{cube, range_cube};
pub use cylinder::{cone, cylinder, Height};

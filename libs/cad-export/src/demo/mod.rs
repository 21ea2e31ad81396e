//! # Demo Models
//!
//! A small built-in model set for the `cad-export` binary. Each model shows
//! one way of building geometry: a primitive, a partial sweep, a multi-ring
//! loft, a revolution, a generator producing a mirrored pair, and a
//! parametric model that reads its dimensions from a JSON file.
//!
//! The parameter file is re-read on every build, so `cad-export watch
//! open_box --watch params.json --params params.json` rebuilds the box
//! whenever the file is saved.

mod open_box;

pub use open_box::{open_box, BoxParams};

use std::path::PathBuf;

use cad_math::{cubic_bezier, Point2, Point3};
use cad_mesh::primitives::{cube, cylinder, Height};
use cad_mesh::{extrude, loft_rings, revolve, LoftOptions, MeshData, RevolveParams};
use config::constants::DEFAULT_DEDUP_TOLERANCE;
use glam::DVec3;

use crate::error::ExportResult;
use crate::registry::{GeneratedObjects, ModelGenerator, ModelRegistry};

/// Builds the demo registry.
///
/// `params` is the JSON parameter file for the open box; defaults are used
/// when it is `None`.
pub fn registry(params: Option<PathBuf>) -> ExportResult<ModelRegistry> {
    let mut reg = ModelRegistry::new();
    reg.register_fn("cube", || Ok(cube(20.0, 20.0, 20.0)?))?;
    reg.register_fn("partial_cylinder", || {
        Ok(cylinder(10.0, Height::Range(0.0, 15.0), 32, 270.0, None)?)
    })?;
    reg.register_fn("tapered_tube", tapered_tube)?;
    reg.register_fn("ring", ring)?;
    reg.register(WedgePair)?;
    reg.register_fn("open_box", move || {
        let box_params = match &params {
            Some(path) => BoxParams::load(path)?,
            None => BoxParams::default(),
        };
        open_box(&box_params)
    })?;
    Ok(reg)
}

fn circle(radius: f64, z: f64, segments: usize) -> Vec<Point3> {
    (0..segments)
        .map(|i| {
            let (sin, cos) = (std::f64::consts::TAU * i as f64 / segments as f64).sin_cos();
            Point3::new(radius * cos, radius * sin, z)
        })
        .collect()
}

/// A hollow tube whose radius eases from 12 down to 5 along a Bezier curve.
///
/// The rings run up the outside and back down the inside; wrapping the loft
/// closes the bottom annulus.
pub fn tapered_tube() -> ExportResult<MeshData> {
    const WALL: f64 = 1.5;
    const SEGMENTS: usize = 32;

    // x is the radius, z the height
    let spine = cubic_bezier(
        9,
        Point3::new(12.0, 0.0, 0.0),
        Point3::new(12.0, 0.0, 20.0),
        Point3::new(5.0, 0.0, 20.0),
        Point3::new(5.0, 0.0, 40.0),
    )?;

    let outside = spine.iter().map(|s| circle(s.x, s.z, SEGMENTS));
    let inside = spine.iter().rev().map(|s| circle(s.x - WALL, s.z, SEGMENTS));
    let rings: Vec<Vec<Point3>> = outside.chain(inside).collect();

    let options = LoftOptions {
        wrap: true,
        ..LoftOptions::default()
    };
    Ok(loft_rings(&rings, &options)?)
}

/// A square-section ring revolved about Z.
pub fn ring() -> ExportResult<MeshData> {
    let profile = [
        Point2::new(8.0, 0.0),
        Point2::new(10.0, 0.0),
        Point2::new(10.0, 4.0),
        Point2::new(8.0, 4.0),
    ];
    let params = RevolveParams {
        segments: 48,
        ..RevolveParams::default()
    };
    Ok(revolve(&profile, &params)?)
}

/// Two wedges, the left one a mirror image of the right.
struct WedgePair;

impl ModelGenerator for WedgePair {
    fn object_names(&self) -> Vec<String> {
        vec!["wedge_left".to_string(), "wedge_right".to_string()]
    }

    fn generate(&self) -> ExportResult<GeneratedObjects> {
        let profile = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(15.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
        ];
        let right = extrude(&profile, DVec3::new(0.0, 0.0, 8.0), DEFAULT_DEDUP_TOLERANCE)?
            .translated(5.0, 0.0, 0.0);
        let left = right.mirrored_x();

        let mut objects = GeneratedObjects::new();
        objects.insert("wedge_left".to_string(), left);
        objects.insert("wedge_right".to_string(), right);
        Ok(objects)
    }
}

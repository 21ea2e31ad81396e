//! Parametric open box.
//!
//! A tray with walls of constant thickness around a convex perimeter. The
//! inner perimeter is found by moving every outer edge inwards by the wall
//! thickness and intersecting neighbouring edges.

use std::f64::consts::TAU;
use std::fs;
use std::path::Path;

use cad_math::{Line2, Point2};
use cad_mesh::{MeshBuilder, MeshData, VertexId};
use config::constants::EPSILON;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};

const MODEL: &str = "open_box";

/// Dimensions of the open box.
///
/// Missing fields in a parameter file fall back to the defaults.
///
/// ```json
/// { "perimeter": [[0, 0], [80, 0], [80, 40], [0, 40]], "wall_thickness": 2.0, "height": 25.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxParams {
    /// Outer outline as (x, y) points, counter-clockwise and convex
    pub perimeter: Vec<[f64; 2]>,
    pub wall_thickness: f64,
    pub height: f64,
}

impl Default for BoxParams {
    fn default() -> Self {
        Self {
            perimeter: vec![
                [0.0, 0.0],
                [60.0, 0.0],
                [120.0, 60.0],
                [120.0, 120.0],
                [0.0, 120.0],
            ],
            wall_thickness: 4.0,
            height: 50.0,
        }
    }
}

impl BoxParams {
    /// Reads parameters from a JSON file.
    pub fn load(path: &Path) -> ExportResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    fn outline(&self) -> Vec<Point2> {
        self.perimeter.iter().map(|&[x, y]| Point2::new(x, y)).collect()
    }
}

/// True when `points` turn left at every corner and wind exactly once.
fn is_convex_ccw(points: &[Point2]) -> bool {
    let n = points.len();
    let mut total = 0.0;
    for i in 0..n {
        let prev = Line2::new(points[(i + n - 1) % n], points[i]);
        let next = Line2::new(points[i], points[(i + 1) % n]);
        let turn = prev.angle_full(&next);
        if turn <= EPSILON {
            return false;
        }
        total += turn;
    }
    (total - TAU).abs() < 1e-6
}

/// True when every inner edge runs the same way as its outer edge, i.e. no
/// edge vanished or flipped while offsetting.
fn keeps_edge_directions(outer: &[Point2], inner: &[Point2]) -> bool {
    let n = outer.len();
    (0..n).all(|i| {
        let j = (i + 1) % n;
        (inner[j] - inner[i]).dot(outer[j] - outer[i]) > EPSILON
    })
}

fn inner_outline(outline: &[Point2], wall: f64) -> ExportResult<Vec<Point2>> {
    let n = outline.len();
    (0..n)
        .map(|i| -> ExportResult<Point2> {
            // Edge normals point to the right, i.e. outwards for a CCW outline
            let prev = Line2::new(outline[(i + n - 1) % n], outline[i]).shifted_along_normal(-wall)?;
            let next = Line2::new(outline[i], outline[(i + 1) % n]).shifted_along_normal(-wall)?;
            prev.intersect(&next).ok_or_else(|| {
                ExportError::generation(MODEL, format!("walls meeting at corner {i} are parallel"))
            })
        })
        .collect()
}

/// Builds the open box.
///
/// # Errors
///
/// `Generation` when the perimeter has fewer than 3 points, is not convex
/// and counter-clockwise, or the walls are too thick for it; also for a
/// non-positive wall thickness or a height not above the floor.
pub fn open_box(params: &BoxParams) -> ExportResult<MeshData> {
    let outline = params.outline();
    if outline.len() < 3 {
        return Err(ExportError::generation(MODEL, "perimeter needs at least 3 points"));
    }
    if !(params.wall_thickness > 0.0) {
        return Err(ExportError::generation(MODEL, "wall thickness must be positive"));
    }
    if !(params.height > params.wall_thickness) {
        return Err(ExportError::generation(
            MODEL,
            "height must be greater than the wall thickness",
        ));
    }
    if !is_convex_ccw(&outline) {
        return Err(ExportError::generation(
            MODEL,
            "perimeter must be convex and counter-clockwise",
        ));
    }
    let inner = inner_outline(&outline, params.wall_thickness)?;
    if !keeps_edge_directions(&outline, &inner) {
        return Err(ExportError::generation(MODEL, "walls are too thick for the perimeter"));
    }

    let (wall, height) = (params.wall_thickness, params.height);
    let mut mesh = MeshBuilder::new();
    let ring = |mesh: &mut MeshBuilder, pts: &[Point2], z: f64| -> Vec<VertexId> {
        pts.iter().map(|p| mesh.add_xyz(p.x, p.y, z)).collect()
    };
    let outer_base = ring(&mut mesh, &outline, 0.0);
    let outer_top = ring(&mut mesh, &outline, height);
    let inner_floor = ring(&mut mesh, &inner, wall);
    let inner_top = ring(&mut mesh, &inner, height);

    let n = outline.len();
    for i in 0..n {
        let j = (i + 1) % n;
        // Outer wall
        mesh.add_quad(outer_base[i], outer_base[j], outer_top[j], outer_top[i])?;
        // Top rim
        mesh.add_quad(outer_top[i], outer_top[j], inner_top[j], inner_top[i])?;
        // Inner wall, facing the cavity
        mesh.add_quad(inner_floor[j], inner_floor[i], inner_top[i], inner_top[j])?;
    }

    let mut base = outer_base;
    base.reverse();
    mesh.add_face(&base)?;
    mesh.add_face(&inner_floor)?;

    Ok(mesh.finish())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_default_box() {
        let mesh = open_box(&BoxParams::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 20);
        assert_eq!(mesh.face_count(), 3 * 5 + 2);
        let (min, max) = mesh.bounding_box();
        assert_eq!(min.z, 0.0);
        assert_eq!(max.z, 50.0);
        assert_eq!(max.x, 120.0);
    }

    #[test]
    fn test_inner_outline_of_square() {
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let inner = inner_outline(&square, 1.0).unwrap();
        let expected = [(1.0, 1.0), (9.0, 1.0), (9.0, 9.0), (1.0, 9.0)];
        for (p, (x, y)) in inner.iter().zip(expected) {
            assert_relative_eq!(p.x, x, epsilon = 1e-9);
            assert_relative_eq!(p.y, y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rejects_bad_perimeters() {
        let clockwise = BoxParams {
            perimeter: vec![[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]],
            ..BoxParams::default()
        };
        assert!(matches!(open_box(&clockwise), Err(ExportError::Generation { .. })));

        let concave = BoxParams {
            perimeter: vec![[0.0, 0.0], [10.0, 0.0], [5.0, 2.0], [10.0, 10.0], [0.0, 10.0]],
            ..BoxParams::default()
        };
        assert!(open_box(&concave).is_err());

        let too_thick = BoxParams {
            perimeter: vec![[0.0, 0.0], [6.0, 0.0], [6.0, 6.0], [0.0, 6.0]],
            wall_thickness: 4.0,
            height: 10.0,
        };
        assert!(open_box(&too_thick).is_err());

        let too_flat = BoxParams {
            height: 2.0,
            ..BoxParams::default()
        };
        assert!(open_box(&too_flat).is_err());
    }

    #[test]
    fn test_load_partial_params() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("box.json");
        fs::write(&path, r#"{ "height": 30.0 }"#).unwrap();

        let params = BoxParams::load(&path).unwrap();
        assert_eq!(params.height, 30.0);
        assert_eq!(params.wall_thickness, 4.0);
        assert_eq!(params.perimeter.len(), 5);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(BoxParams::load(&missing), Err(ExportError::Io { .. })));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ height: ").unwrap();
        assert!(matches!(BoxParams::load(&broken), Err(ExportError::Json(_))));
    }
}

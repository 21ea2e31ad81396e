//! # Export
//!
//! Writes registry objects to files, one file per object.
//!
//! Requested names are checked before anything touches the filesystem, so an
//! unknown name never leaves a half-written output directory. Objects are
//! then generated and written in parallel.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use cad_mesh::MeshData;
use clap::ValueEnum;
use rayon::prelude::*;
use tracing::info;

use crate::error::{ExportError, ExportResult};
use crate::json::write_json;
use crate::registry::ModelRegistry;
use crate::stl;

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Binary STL
    #[default]
    Binary,
    /// ASCII STL
    Ascii,
    /// Vertex table + face list as JSON
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Binary | ExportFormat::Ascii => "stl",
            ExportFormat::Json => "json",
        }
    }
}

/// Path of the file `name` is written to inside `dir`.
pub fn output_path(dir: &Path, name: &str, format: ExportFormat) -> PathBuf {
    dir.join(format!("{name}.{}", format.extension()))
}

/// Writes one mesh to `<dir>/<name>.<ext>`, returning the path written.
pub fn write_mesh_file(
    dir: &Path,
    name: &str,
    mesh: &MeshData,
    format: ExportFormat,
) -> ExportResult<PathBuf> {
    let path = output_path(dir, name, format);
    let file = File::create(&path).map_err(|e| ExportError::io(&path, e))?;
    let writer = BufWriter::new(file);
    match format {
        ExportFormat::Binary => stl::write_binary(mesh, name, writer),
        ExportFormat::Ascii => stl::write_ascii(mesh, name, writer),
        ExportFormat::Json => write_json(mesh, writer).map_err(io::Error::from),
    }
    .map_err(|e| ExportError::io(&path, e))?;
    Ok(path)
}

/// Exports the requested objects (all objects when `requested` is empty)
/// into `out_dir`, creating it if needed.
///
/// # Errors
///
/// `UnknownModel` before any file is written if a name is not registered;
/// otherwise the first generation or I/O failure.
pub fn export_models(
    registry: &ModelRegistry,
    requested: &[String],
    out_dir: &Path,
    format: ExportFormat,
) -> ExportResult<Vec<PathBuf>> {
    let names = registry.resolve(requested)?;
    fs::create_dir_all(out_dir).map_err(|e| ExportError::io(out_dir, e))?;

    names
        .par_iter()
        .map(|name| {
            info!(model = %name, "exporting");
            let mesh = registry.object(name)?;
            let path = write_mesh_file(out_dir, name, mesh, format)?;
            info!(path = %path.display(), faces = mesh.face_count(), "wrote");
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use cad_mesh::primitives::cube;
    use config::constants::{STL_HEADER_SIZE, STL_TRIANGLE_SIZE};
    use tempfile::tempdir;

    use super::*;

    fn registry() -> ModelRegistry {
        let mut reg = ModelRegistry::new();
        reg.register_fn("small", || Ok(cube(1.0, 1.0, 1.0)?)).unwrap();
        reg.register_fn("large", || Ok(cube(5.0, 5.0, 5.0)?)).unwrap();
        reg
    }

    #[test]
    fn test_export_all_models() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("stl_out");
        let paths = export_models(&registry(), &[], &out, ExportFormat::Binary).unwrap();

        assert_eq!(paths, vec![out.join("large.stl"), out.join("small.stl")]);
        let bytes = fs::read(out.join("small.stl")).unwrap();
        assert_eq!(bytes.len(), STL_HEADER_SIZE + 4 + 12 * STL_TRIANGLE_SIZE);
    }

    #[test]
    fn test_export_selected_model_as_json() {
        let dir = tempdir().unwrap();
        let paths = export_models(&registry(), &["large".to_string()], dir.path(), ExportFormat::Json)
            .unwrap();
        assert_eq!(paths, vec![dir.path().join("large.json")]);
        let text = fs::read_to_string(&paths[0]).unwrap();
        assert!(text.contains("\"faces\""));
    }

    #[test]
    fn test_unknown_model_writes_nothing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("never_created");
        let err = export_models(
            &registry(),
            &["small".to_string(), "nope".to_string()],
            &out,
            ExportFormat::Ascii,
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::UnknownModel { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_write_into_missing_dir_reports_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("a").join("b");
        let err = write_mesh_file(&missing, "x", &MeshData::new(), ExportFormat::Binary).unwrap_err();
        match err {
            ExportError::Io { path, .. } => assert_eq!(path, missing.join("x.stl")),
            other => panic!("expected Io error, got {other}"),
        }
    }

    #[test]
    fn test_extensions() {
        assert_eq!(ExportFormat::Binary.extension(), "stl");
        assert_eq!(ExportFormat::Ascii.extension(), "stl");
        assert_eq!(ExportFormat::Json.extension(), "json");
    }
}

//! # Command Line
//!
//! `cad-export` subcommands:
//!
//! - `cad-export export [MODEL...] [-o DIR] [-l] [--format FMT]`: write
//!   the named models (all models when none are named)
//! - `cad-export watch MODEL --watch PATH... [--interval-ms N] [-o DIR]`:
//!   rebuild a model whenever a watched file changes

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use config::constants::{DEFAULT_OUT_DIR_NAME, DEFAULT_POLL_INTERVAL_MS};
use tracing::info;

use crate::error::{ExportError, ExportResult};
use crate::export::{export_models, ExportFormat};
use crate::registry::ModelRegistry;
use crate::watch::{DevLoop, FileWatcher, StlDirSink};

/// Export CAD models to STL
#[derive(Debug, Parser)]
#[command(name = "cad-export")]
#[command(about = "Export CAD models authored as code", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON parameter file for parametric models
    #[arg(long, global = true, value_name = "FILE")]
    pub params: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write models to files
    Export {
        /// The models to export (all models when empty)
        #[arg(value_name = "MODEL")]
        models: Vec<String>,

        /// The output directory
        #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// List the available models and exit
        #[arg(short = 'l', long)]
        list: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Binary)]
        format: ExportFormat,
    },

    /// Rebuild a model whenever watched files change
    Watch {
        /// The model to rebuild
        #[arg(value_name = "MODEL")]
        model: String,

        /// Files to watch (repeatable)
        #[arg(long = "watch", value_name = "PATH", required = true)]
        watch: Vec<PathBuf>,

        /// Polling interval in milliseconds
        #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
        interval_ms: u64,

        /// The output directory
        #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Binary)]
        format: ExportFormat,
    },
}

fn out_dir(output_dir: &Option<PathBuf>) -> PathBuf {
    output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR_NAME))
}

/// Runs a parsed command line against `registry`.
///
/// Listings and export summaries go to `out`; the watch loop runs until the
/// process is stopped.
pub fn run<W: Write>(cli: &Cli, registry: &ModelRegistry, out: &mut W) -> ExportResult<()> {
    match &cli.command {
        Commands::Export {
            models,
            output_dir,
            list,
            format,
        } => {
            if *list {
                for name in registry.names() {
                    writeln!(out, "{name}").map_err(|e| ExportError::io("<stdout>", e))?;
                }
                return Ok(());
            }
            let dir = out_dir(output_dir);
            let paths = export_models(registry, models, &dir, *format)?;
            for path in &paths {
                writeln!(out, "{}", path.display()).map_err(|e| ExportError::io("<stdout>", e))?;
            }
            info!(count = paths.len(), dir = %dir.display(), "export complete");
            Ok(())
        }
        Commands::Watch {
            model,
            watch,
            interval_ms,
            output_dir,
            format,
        } => {
            let sink = StlDirSink::new(out_dir(output_dir), *format)?;
            let watcher = FileWatcher::new(watch.iter().cloned());
            let mut dev = DevLoop::new(
                registry,
                model.as_str(),
                sink,
                watcher,
                Duration::from_millis(*interval_ms),
            )?;
            dev.run(|| false);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use cad_mesh::primitives::cube;
    use clap::CommandFactory;
    use tempfile::tempdir;

    use super::*;

    fn registry() -> ModelRegistry {
        let mut reg = ModelRegistry::new();
        reg.register_fn("b", || Ok(cube(1.0, 1.0, 1.0)?)).unwrap();
        reg.register_fn("a", || Ok(cube(2.0, 2.0, 2.0)?)).unwrap();
        reg
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export_defaults() {
        let cli = Cli::try_parse_from(["cad-export", "export"]).unwrap();
        match cli.command {
            Commands::Export {
                models,
                output_dir,
                list,
                format,
            } => {
                assert!(models.is_empty());
                assert!(output_dir.is_none());
                assert!(!list);
                assert_eq!(format, ExportFormat::Binary);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_watch() {
        let cli = Cli::try_parse_from([
            "cad-export",
            "watch",
            "open_box",
            "--watch",
            "a.json",
            "--watch",
            "b.json",
            "--interval-ms",
            "100",
            "--params",
            "a.json",
        ])
        .unwrap();
        assert_eq!(cli.params, Some(PathBuf::from("a.json")));
        match cli.command {
            Commands::Watch {
                model,
                watch,
                interval_ms,
                ..
            } => {
                assert_eq!(model, "open_box");
                assert_eq!(watch, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
                assert_eq!(interval_ms, 100);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_watch_requires_paths() {
        assert!(Cli::try_parse_from(["cad-export", "watch", "open_box"]).is_err());
    }

    #[test]
    fn test_list_prints_sorted_names() {
        let cli = Cli::try_parse_from(["cad-export", "export", "-l"]).unwrap();
        let mut out = Vec::new();
        run(&cli, &registry(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_export_to_dir() {
        let dir = tempdir().unwrap();
        let out_dir = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["cad-export", "export", "b", "-o", out_dir, "--format", "ascii"])
            .unwrap();
        let mut out = Vec::new();
        run(&cli, &registry(), &mut out).unwrap();

        let written = dir.path().join("b.stl");
        assert!(written.exists());
        assert!(!dir.path().join("a.stl").exists());
        assert!(String::from_utf8(out).unwrap().contains("b.stl"));
        assert!(std::fs::read_to_string(written).unwrap().starts_with("solid b"));
    }

    #[test]
    fn test_export_unknown_model() {
        let dir = tempdir().unwrap();
        let out_dir = dir.path().join("out");
        let cli = Cli::try_parse_from([
            "cad-export",
            "export",
            "zzz",
            "-o",
            out_dir.to_str().unwrap(),
        ])
        .unwrap();
        let err = run(&cli, &registry(), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, ExportError::UnknownModel { .. }));
        assert!(!out_dir.exists());
    }
}

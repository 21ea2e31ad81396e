//! # Live Reload
//!
//! Polls a set of files and rebuilds a model whenever any of them changes.
//!
//! Each rebuild starts from scratch: the sink is cleared, the model's
//! generator runs again with no cached state, and every object it produces
//! is ingested. A failed rebuild is logged and the loop keeps watching, so
//! fixing the input and saving again is enough to recover.
//!
//! Files that do not exist are tracked as absent; creating one counts as a
//! change.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

use cad_mesh::{MeshData, MeshSink};
use tracing::{debug, error, info, warn};

use crate::error::{ExportError, ExportResult};
use crate::export::{write_mesh_file, ExportFormat};
use crate::registry::ModelRegistry;

// =============================================================================
// FILE WATCHER
// =============================================================================

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Modification-time snapshot of a set of files.
#[derive(Debug, Clone)]
pub struct FileWatcher {
    entries: Vec<(PathBuf, Option<SystemTime>)>,
}

impl FileWatcher {
    /// Starts watching `paths`, recording their current state.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let entries = paths
            .into_iter()
            .map(|p| {
                let path = p.into();
                let stamp = modified_time(&path);
                (path, stamp)
            })
            .collect();
        Self { entries }
    }

    /// Paths being watched.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|(p, _)| p.as_path())
    }

    /// Returns the files that changed since the last poll and updates the
    /// snapshot.
    pub fn poll(&mut self) -> Vec<PathBuf> {
        let mut changed = Vec::new();
        for (path, stamp) in &mut self.entries {
            let now = modified_time(path);
            if now != *stamp {
                debug!(path = %path.display(), "change detected");
                *stamp = now;
                changed.push(path.clone());
            }
        }
        changed
    }
}

// =============================================================================
// DIRECTORY SINK
// =============================================================================

/// Sink that writes each ingested mesh to a file in a directory.
///
/// `clear` deletes the files this sink wrote, leaving anything else in the
/// directory alone.
#[derive(Debug)]
pub struct StlDirSink {
    dir: PathBuf,
    format: ExportFormat,
    written: BTreeSet<PathBuf>,
}

impl StlDirSink {
    /// Creates the sink, creating `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>, format: ExportFormat) -> ExportResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| ExportError::io(&dir, e))?;
        Ok(Self {
            dir,
            format,
            written: BTreeSet::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written since the last `clear`.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.written.iter().map(PathBuf::as_path)
    }
}

impl MeshSink for StlDirSink {
    type Error = ExportError;

    fn clear(&mut self) -> ExportResult<()> {
        for path in std::mem::take(&mut self.written) {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(ExportError::io(path, e)),
            }
        }
        Ok(())
    }

    fn ingest(&mut self, name: &str, mesh: MeshData) -> ExportResult<()> {
        let path = write_mesh_file(&self.dir, name, &mesh, self.format)?;
        info!(path = %path.display(), "wrote");
        self.written.insert(path);
        Ok(())
    }
}

// =============================================================================
// DEV LOOP
// =============================================================================

/// Rebuilds one model into a sink whenever watched files change.
pub struct DevLoop<'a, S: MeshSink> {
    registry: &'a ModelRegistry,
    model: String,
    sink: S,
    watcher: FileWatcher,
    interval: Duration,
}

impl<'a, S: MeshSink> DevLoop<'a, S> {
    /// Creates the loop.
    ///
    /// # Errors
    ///
    /// `UnknownModel` if `model` is not registered.
    pub fn new(
        registry: &'a ModelRegistry,
        model: impl Into<String>,
        sink: S,
        watcher: FileWatcher,
        interval: Duration,
    ) -> ExportResult<Self> {
        let model = model.into();
        if !registry.contains(&model) {
            return Err(ExportError::UnknownModel { names: vec![model] });
        }
        Ok(Self {
            registry,
            model,
            sink,
            watcher,
            interval,
        })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Clears the sink and rebuilds the model from scratch.
    ///
    /// Returns the number of objects ingested.
    pub fn regenerate(&mut self) -> ExportResult<usize> {
        self.sink
            .clear()
            .map_err(|e| ExportError::sink(e.to_string()))?;
        let objects = self.registry.generate_fresh(&self.model)?;
        let count = objects.len();
        for (name, mesh) in objects {
            self.sink
                .ingest(&name, mesh)
                .map_err(|e| ExportError::sink(e.to_string()))?;
        }
        Ok(count)
    }

    /// Rebuilds, logging instead of returning any failure.
    fn regenerate_logged(&mut self) {
        match self.regenerate() {
            Ok(count) => info!(model = %self.model, objects = count, "model rebuilt"),
            Err(e) => error!(model = %self.model, error = %e, "rebuild failed"),
        }
    }

    /// Polls once; rebuilds if anything changed. Returns whether it rebuilt.
    pub fn poll_once(&mut self) -> bool {
        let changed = self.watcher.poll();
        if changed.is_empty() {
            return false;
        }
        for path in &changed {
            info!(path = %path.display(), "file changed");
        }
        self.regenerate_logged();
        true
    }

    /// Builds once, then polls until `should_stop` returns true.
    pub fn run(&mut self, mut should_stop: impl FnMut() -> bool) {
        if self.watcher.entries.is_empty() {
            warn!("no files to watch; changes will never trigger a rebuild");
        }
        info!(
            model = %self.model,
            interval_ms = self.interval.as_millis() as u64,
            "watching for changes"
        );
        self.regenerate_logged();
        while !should_stop() {
            thread::sleep(self.interval);
            self.poll_once();
        }
    }
}

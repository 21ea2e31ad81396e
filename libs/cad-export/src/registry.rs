//! # Model Registry
//!
//! Maps object names to the generators that build them.
//!
//! A generator may build several objects at once (parts whose dimensions
//! depend on each other). Each generator succeeds at most once per registry
//! for export, even under concurrent lookups; its output is cached and every
//! object it declared is served from that cache. A failed run is retried on
//! the next lookup. The live-reload loop bypasses the cache with
//! [`ModelRegistry::generate_fresh`].

use std::collections::BTreeMap;
use std::sync::{Mutex, OnceLock, PoisonError};

use cad_mesh::MeshData;
use tracing::{debug, info};

use crate::error::{ExportError, ExportResult};

/// Objects produced by one generator run, keyed by name.
pub type GeneratedObjects = BTreeMap<String, MeshData>;

/// Code that builds one or more named objects.
pub trait ModelGenerator: Send + Sync {
    /// Names of every object `generate` produces.
    fn object_names(&self) -> Vec<String>;

    /// Builds all objects from scratch.
    fn generate(&self) -> ExportResult<GeneratedObjects>;
}

/// A generator for a single object backed by a closure.
///
/// # Example
///
/// ```rust
/// use cad_export::{ModelGenerator, SimpleGenerator};
/// use cad_mesh::primitives::cube;
///
/// let gen = SimpleGenerator::new("block", || Ok(cube(1.0, 1.0, 1.0)?));
/// assert_eq!(gen.object_names(), vec!["block".to_string()]);
/// assert!(gen.generate().unwrap().contains_key("block"));
/// ```
pub struct SimpleGenerator<F> {
    name: String,
    build: F,
}

impl<F> SimpleGenerator<F>
where
    F: Fn() -> ExportResult<MeshData> + Send + Sync,
{
    pub fn new(name: impl Into<String>, build: F) -> Self {
        Self {
            name: name.into(),
            build,
        }
    }
}

impl<F> ModelGenerator for SimpleGenerator<F>
where
    F: Fn() -> ExportResult<MeshData> + Send + Sync,
{
    fn object_names(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn generate(&self) -> ExportResult<GeneratedObjects> {
        let mesh = (self.build)()?;
        Ok(GeneratedObjects::from([(self.name.clone(), mesh)]))
    }
}

struct Entry {
    generator: Box<dyn ModelGenerator>,
    cache: OnceLock<GeneratedObjects>,
    /// Held while the first build runs so concurrent lookups share it
    building: Mutex<()>,
}

impl Entry {
    fn cached(&self) -> ExportResult<&GeneratedObjects> {
        if let Some(objects) = self.cache.get() {
            return Ok(objects);
        }
        let _guard = self.building.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(objects) = self.cache.get() {
            return Ok(objects);
        }
        let fresh = run_generator(self.generator.as_ref())?;
        Ok(self.cache.get_or_init(|| fresh))
    }
}

/// Registry of named objects and their generators.
#[derive(Default)]
pub struct ModelRegistry {
    entries: Vec<Entry>,
    index: BTreeMap<String, usize>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a generator under every name it declares.
    ///
    /// # Errors
    ///
    /// `DuplicateModel` if any declared name is already registered (or
    /// declared twice by this generator). Nothing is registered on error.
    pub fn register<G: ModelGenerator + 'static>(&mut self, generator: G) -> ExportResult<()> {
        let names = generator.object_names();
        for (i, name) in names.iter().enumerate() {
            if self.index.contains_key(name) || names[..i].contains(name) {
                return Err(ExportError::DuplicateModel { name: name.clone() });
            }
        }

        let slot = self.entries.len();
        for name in names {
            self.index.insert(name, slot);
        }
        self.entries.push(Entry {
            generator: Box::new(generator),
            cache: OnceLock::new(),
            building: Mutex::new(()),
        });
        Ok(())
    }

    /// Registers a single-object closure.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, build: F) -> ExportResult<()>
    where
        F: Fn() -> ExportResult<MeshData> + Send + Sync + 'static,
    {
        self.register(SimpleGenerator::new(name, build))
    }

    /// All object names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.index.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Resolves requested names, or every name when `requested` is empty.
    ///
    /// # Errors
    ///
    /// `UnknownModel` listing every requested name that is not registered.
    pub fn resolve(&self, requested: &[String]) -> ExportResult<Vec<String>> {
        if requested.is_empty() {
            return Ok(self.index.keys().cloned().collect());
        }
        let unknown: Vec<String> = requested
            .iter()
            .filter(|name| !self.contains(name))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(ExportError::UnknownModel { names: unknown });
        }
        Ok(requested.to_vec())
    }

    fn entry(&self, name: &str) -> ExportResult<&Entry> {
        self.index
            .get(name)
            .map(|&slot| &self.entries[slot])
            .ok_or_else(|| ExportError::UnknownModel {
                names: vec![name.to_string()],
            })
    }

    /// Returns the object named `name`, running its generator on first use.
    ///
    /// # Errors
    ///
    /// `UnknownModel` for an unregistered name, `UnexpectedObjects` when the
    /// generator's output does not match its declared names, or whatever the
    /// generator itself reports.
    pub fn object(&self, name: &str) -> ExportResult<&MeshData> {
        let entry = self.entry(name)?;
        let objects = entry.cached()?;
        objects.get(name).ok_or_else(|| ExportError::UnexpectedObjects {
            generated: objects.keys().cloned().collect(),
            expected: entry.generator.object_names(),
        })
    }

    /// Runs the generator owning `name` from scratch, ignoring the cache.
    ///
    /// Returns every object that generator builds.
    pub fn generate_fresh(&self, name: &str) -> ExportResult<GeneratedObjects> {
        let entry = self.entry(name)?;
        info!(model = name, "regenerating");
        run_generator(entry.generator.as_ref())
    }
}

fn run_generator(generator: &dyn ModelGenerator) -> ExportResult<GeneratedObjects> {
    let objects = generator.generate()?;

    let generated: Vec<String> = objects.keys().cloned().collect();
    let mut expected = generator.object_names();
    expected.sort();
    if generated != expected {
        return Err(ExportError::UnexpectedObjects {
            generated,
            expected,
        });
    }
    debug!(objects = ?generated, "generator finished");
    Ok(objects)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use cad_mesh::primitives::cube;

    use super::*;

    struct Pair {
        runs: Arc<AtomicUsize>,
        emit_extra: bool,
    }

    impl ModelGenerator for Pair {
        fn object_names(&self) -> Vec<String> {
            vec!["left".into(), "right".into()]
        }

        fn generate(&self) -> ExportResult<GeneratedObjects> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            let part = cube(1.0, 1.0, 1.0)?;
            let mut objects = GeneratedObjects::new();
            objects.insert("left".into(), part.translated(-2.0, 0.0, 0.0));
            objects.insert("right".into(), part.translated(2.0, 0.0, 0.0));
            if self.emit_extra {
                objects.insert("stray".into(), part);
            }
            Ok(objects)
        }
    }

    fn pair(emit_extra: bool) -> (Pair, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        (
            Pair {
                runs: Arc::clone(&runs),
                emit_extra,
            },
            runs,
        )
    }

    #[test]
    fn test_names_sorted() {
        let mut reg = ModelRegistry::new();
        reg.register_fn("zeta", || Ok(cube(1.0, 1.0, 1.0)?)).unwrap();
        reg.register_fn("alpha", || Ok(cube(1.0, 1.0, 1.0)?)).unwrap();
        assert_eq!(reg.names(), vec!["alpha", "zeta"]);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut reg = ModelRegistry::new();
        reg.register_fn("left", || Ok(cube(1.0, 1.0, 1.0)?)).unwrap();
        let (gen, _) = pair(false);
        let err = reg.register(gen).unwrap_err();
        assert!(matches!(err, ExportError::DuplicateModel { name } if name == "left"));
        // The failed registration left nothing behind
        assert!(!reg.contains("right"));
    }

    #[test]
    fn test_generator_runs_once_for_all_objects() {
        let mut reg = ModelRegistry::new();
        let (gen, runs) = pair(false);
        reg.register(gen).unwrap();

        let left = reg.object("left").unwrap();
        assert_eq!(left.bounding_box().0.x, -2.5);
        reg.object("right").unwrap();
        reg.object("left").unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        reg.generate_fresh("right").unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_lookups_share_one_run() {
        let mut reg = ModelRegistry::new();
        let (gen, runs) = pair(false);
        reg.register(gen).unwrap();

        thread::scope(|s| {
            let workers: Vec<_> = ["left", "right", "left", "right"]
                .into_iter()
                .map(|name| {
                    let reg = &reg;
                    s.spawn(move || reg.object(name).map(|_| ()))
                })
                .collect();
            for worker in workers {
                worker.join().unwrap().unwrap();
            }
        });
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unexpected_objects() {
        let mut reg = ModelRegistry::new();
        let (gen, _) = pair(true);
        reg.register(gen).unwrap();
        let err = reg.object("left").unwrap_err();
        match err {
            ExportError::UnexpectedObjects {
                generated,
                expected,
            } => {
                assert_eq!(generated, vec!["left", "right", "stray"]);
                assert_eq!(expected, vec!["left", "right"]);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_resolve() {
        let mut reg = ModelRegistry::new();
        reg.register_fn("b", || Ok(cube(1.0, 1.0, 1.0)?)).unwrap();
        reg.register_fn("a", || Ok(cube(1.0, 1.0, 1.0)?)).unwrap();

        assert_eq!(reg.resolve(&[]).unwrap(), vec!["a", "b"]);
        assert_eq!(reg.resolve(&["b".into()]).unwrap(), vec!["b"]);

        let err = reg.resolve(&["a".into(), "x".into(), "y".into()]).unwrap_err();
        assert!(matches!(err, ExportError::UnknownModel { names } if names == ["x", "y"]));
    }

    #[test]
    fn test_generation_error_propagates() {
        let mut reg = ModelRegistry::new();
        reg.register_fn("bad", || Err(ExportError::generation("bad", "no walls")))
            .unwrap();
        assert!(matches!(reg.object("bad"), Err(ExportError::Generation { .. })));
        assert!(matches!(reg.object("missing"), Err(ExportError::UnknownModel { .. })));
    }
}

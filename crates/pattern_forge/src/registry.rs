//! Named scene generators for documentation tooling.
//!
//! - [`SceneRegistry`] maps a name to a generator `(rect) -> pattern` and,
//!   separately, to a references table of related generators.
//! - [`registry`] returns the process-wide instance populated with the
//!   built-in scenes on first use.
//!
//! Registration is append-only: a name can be registered once per table.
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::warn;

use crate::error::{Error, Result};
use crate::geom::Rect;
use crate::pattern::PatternRef;

/// Builds a pattern covering the given rectangle.
pub type Generator = Arc<dyn Fn(Rect) -> PatternRef + Send + Sync>;

/// Builds a references table on demand.
pub type ReferencesFn = fn() -> References;

/// Related generators shown next to a scene, with a preferred display order.
#[derive(Clone, Default)]
pub struct References {
    pub generators: BTreeMap<String, Generator>,
    pub order: Vec<String>,
}

impl References {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a generator and appends its name to the display order.
    pub fn with<F>(mut self, name: impl Into<String>, generator: F) -> Self
    where
        F: Fn(Rect) -> PatternRef + Send + Sync + 'static,
    {
        let name = name.into();
        if self
            .generators
            .insert(name.clone(), Arc::new(generator))
            .is_none()
        {
            self.order.push(name);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Generators in display order. Names in `order` without a generator are
    /// skipped; generators missing from `order` follow in name order.
    pub fn ordered(&self) -> Vec<(&str, &Generator)> {
        let mut out: Vec<(&str, &Generator)> = self
            .order
            .iter()
            .filter_map(|n| self.generators.get_key_value(n))
            .map(|(k, g)| (k.as_str(), g))
            .collect();
        for (k, g) in &self.generators {
            if !self.order.contains(k) {
                out.push((k.as_str(), g));
            }
        }
        out
    }
}

impl fmt::Debug for References {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("References")
            .field("generators", &self.generators.keys().collect::<Vec<_>>())
            .field("order", &self.order)
            .finish()
    }
}

/// Registry of scene generators and reference tables, keyed by name.
#[non_exhaustive]
#[derive(Default)]
pub struct SceneRegistry {
    generators: BTreeMap<String, Generator>,
    references: BTreeMap<String, ReferencesFn>,
}

impl SceneRegistry {
    /// Creates a new, empty [`SceneRegistry`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered scene generators.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.generators.contains_key(name)
    }

    /// Scene names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }

    /// Names that carry a references table.
    pub fn reference_names(&self) -> impl Iterator<Item = &str> {
        self.references.keys().map(String::as_str)
    }

    /// Registers a scene generator. Fails with [`Error::DuplicateScene`] when
    /// the name is taken.
    pub fn register<F>(&mut self, name: impl Into<String>, generator: F) -> Result<()>
    where
        F: Fn(Rect) -> PatternRef + Send + Sync + 'static,
    {
        let name = name.into();
        if self.generators.contains_key(&name) {
            return Err(Error::DuplicateScene { name });
        }
        self.generators.insert(name, Arc::new(generator));
        Ok(())
    }

    /// Registers a references table builder under `name`.
    pub fn register_references(
        &mut self,
        name: impl Into<String>,
        references: ReferencesFn,
    ) -> Result<()> {
        let name = name.into();
        if self.references.contains_key(&name) {
            return Err(Error::DuplicateScene { name });
        }
        self.references.insert(name, references);
        Ok(())
    }

    pub fn generator(&self, name: &str) -> Option<&Generator> {
        self.generators.get(name)
    }

    /// Runs the named generator over `rect`.
    pub fn generate(&self, name: &str, rect: Rect) -> Result<PatternRef> {
        match self.generators.get(name) {
            Some(generator) => Ok(generator(rect)),
            None => {
                warn!(scene = name, "Unknown scene requested.");
                Err(Error::UnknownScene {
                    name: name.to_owned(),
                })
            }
        }
    }

    /// Builds the references table registered under `name`.
    pub fn references(&self, name: &str) -> Result<References> {
        match self.references.get(name) {
            Some(build) => Ok(build()),
            None => {
                warn!(scene = name, "Unknown references table requested.");
                Err(Error::UnknownScene {
                    name: name.to_owned(),
                })
            }
        }
    }
}

impl fmt::Debug for SceneRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneRegistry")
            .field("generators", &self.generators.keys().collect::<Vec<_>>())
            .field("references", &self.references.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Process-wide registry with the built-in scenes.
pub fn registry() -> &'static SceneRegistry {
    static REGISTRY: OnceLock<SceneRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = SceneRegistry::new();
        if let Err(err) = crate::scenes::register_builtin(&mut registry) {
            warn!(error = %err, "Built-in scene registration incomplete.");
        }
        registry
    })
}

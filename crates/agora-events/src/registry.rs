//! The event type registry and its contribution pipeline.

use std::sync::{Mutex, PoisonError, RwLock};

use agora_types::{ContributeError, EventTypeMeta, TypeContributor, TypeTable};

/// Registry of event types and their display metadata.
///
/// Construct one per subsystem instance and share it behind an `Arc`; there
/// is no process-global registry, so tests and embedders get isolated
/// instances with explicit lifecycle control (`init`/`reset`/`is_ready`).
///
/// Contributors may be registered at any time. They are consulted exactly
/// once per initialization cycle, in registration order, each receiving the
/// in-progress table and returning the table to continue with — so later
/// contributions win on key collision, and all of them win over the
/// built-in seed.
pub struct TypeRegistry {
    contributors: RwLock<Vec<Box<dyn TypeContributor>>>,
    state: Mutex<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    ready: bool,
    types: TypeTable,
}

impl TypeRegistry {
    /// Creates a registry with no contributors, not yet initialized.
    pub fn new() -> Self {
        Self {
            contributors: RwLock::new(Vec::new()),
            state: Mutex::new(RegistryState::default()),
        }
    }

    /// Registers a contributor to be consulted on the next initialization.
    ///
    /// Registering after initialization has completed has no effect until
    /// [`reset`](Self::reset) forces a rebuild.
    pub fn register(&self, contributor: Box<dyn TypeContributor>) {
        self.contributors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(contributor);
    }

    /// Initializes the registry: seeds the built-in types, folds every
    /// registered contributor over the table, and marks the registry ready.
    ///
    /// Idempotent: once ready, returns immediately without side effects.
    /// Single-flight: the whole sequence runs under one lock, so concurrent
    /// callers block until the first one finishes and then observe
    /// readiness rather than re-running the pipeline.
    ///
    /// # Errors
    ///
    /// Propagates the first contributor error. The registry stays not-ready
    /// in that case, so a later call retries the whole pipeline.
    pub fn init(&self) -> Result<(), ContributeError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.ready {
            return Ok(());
        }

        let mut types = builtin_types();
        let contributors = self
            .contributors
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        for contributor in contributors.iter() {
            types = contributor.extend(types)?;
        }

        tracing::info!(types = types.len(), "event type registry initialized");

        state.types = types;
        state.ready = true;
        Ok(())
    }

    /// Returns the metadata for a type key, or the generic unknown-type
    /// metadata if the key is not registered.
    ///
    /// Never fails: event types may be contributed by plugins that are
    /// later disabled, and their events must still render.
    pub fn resolve(&self, type_key: &str) -> EventTypeMeta {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .types
            .get(type_key)
            .cloned()
            .unwrap_or_else(unknown_type)
    }

    /// Clears readiness and the merged table so the next [`init`](Self::init)
    /// rebuilds from scratch. Intended for tests and administrative tooling
    /// that needs to force re-initialization.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.ready = false;
        state.types = TypeTable::new();
    }

    /// Reports whether initialization has completed.
    pub fn is_ready(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .ready
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in topic lifecycle event types.
fn builtin_types() -> TypeTable {
    let mut types = TypeTable::new();
    for (key, icon, text) in [
        ("pin", "fa-thumb-tack", "Topic pinned"),
        ("unpin", "fa-thumb-tack", "Topic unpinned"),
        ("lock", "fa-lock", "Topic locked"),
        ("unlock", "fa-unlock", "Topic unlocked"),
        ("move", "fa-arrow-circle-right", "Topic moved"),
        ("merge", "fa-compress", "Topic merged"),
        ("fork", "fa-code-fork", "Topic forked"),
        ("delete", "fa-trash", "Topic deleted"),
        ("restore", "fa-undo", "Topic restored"),
        ("purge", "fa-eraser", "Topic purged"),
    ] {
        types.insert(key.to_string(), EventTypeMeta::new(icon, text));
    }
    types
}

/// Fallback metadata for type keys the registry does not know.
fn unknown_type() -> EventTypeMeta {
    EventTypeMeta::new("fa-question-circle", "Unknown event")
}

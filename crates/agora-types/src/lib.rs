//! Shared types for the Agora topic event subsystem.
//!
//! This crate provides the type definitions shared between the event log
//! core and any code that contributes to or consumes it: event-type display
//! metadata, the type table, and the contribution capability plugins
//! implement to register their own event types.
//!
//! No crate in the workspace depends on anything *except* `agora-types` for
//! cross-cutting type definitions. This keeps the dependency graph clean and
//! prevents circular dependencies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Display metadata for a single event type.
///
/// `icon` and `text` drive rendering; any further fields a contributor
/// attaches ride along in `extra` and are exposed verbatim on enriched
/// events. On the wire the extras are flattened into the object, so a
/// contributed `{"quux": "quux"}` serialises as a top-level `quux` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTypeMeta {
    /// Icon token (e.g. `fa-lock`) shown next to the event.
    pub icon: String,
    /// Display label for the event.
    pub text: String,
    /// Additional contributor-defined fields. An empty map contributes no
    /// keys on the wire.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventTypeMeta {
    /// Creates metadata with the given icon and label and no extra fields.
    pub fn new(icon: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            text: text.into(),
            extra: Map::new(),
        }
    }

    /// Attaches an extra field, returning the modified metadata.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// The table of known event types, keyed by type token.
///
/// Passed through the contribution pipeline during registry initialization;
/// each contributor receives the in-progress table and returns a possibly
/// extended one.
pub type TypeTable = BTreeMap<String, EventTypeMeta>;

/// Error returned by a failing type contributor.
#[derive(Debug, Error)]
#[error("type contribution failed: {0}")]
pub struct ContributeError(pub String);

/// Capability for external code to extend the event type table.
///
/// Contributors are folded in registration order during registry
/// initialization. Each receives the table built so far and returns the
/// table to continue with, so later contributions win on key collision.
/// Returning an error aborts initialization; the registry stays not-ready
/// and the next `init()` retries the whole pipeline.
pub trait TypeContributor: Send + Sync {
    /// Extends the in-progress type table.
    fn extend(&self, types: TypeTable) -> Result<TypeTable, ContributeError>;
}

impl<F> TypeContributor for F
where
    F: Fn(TypeTable) -> Result<TypeTable, ContributeError> + Send + Sync,
{
    fn extend(&self, types: TypeTable) -> Result<TypeTable, ContributeError> {
        self(types)
    }
}

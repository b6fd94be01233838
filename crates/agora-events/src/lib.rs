//! Per-topic audit/event log for the Agora platform.
//!
//! Records discrete, typed lifecycle events (state changes, moderation
//! actions, plugin-defined occurrences) against a parent topic, renders
//! them with pluggable display metadata, and supports selective or total
//! retraction.
//!
//! # Components
//!
//! - **Type registry** ([`TypeRegistry`]): table of event types and their
//!   display metadata, seeded with the built-in topic lifecycle types and
//!   extended by registered [`TypeContributor`](agora_types::TypeContributor)s.
//!   Lazily and idempotently initialized; unknown keys resolve to a generic
//!   fallback, never an error.
//! - **Event store** ([`store`]): append/read/delete over the per-topic
//!   ordered log in the storage layer, transactional per operation.
//! - **Facade** ([`EventLog`]): the public `init`/`log`/`get`/`purge`
//!   surface, which enriches stored records with registry metadata and a
//!   human-readable timestamp.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use agora_events::{EventInput, EventLog, PurgeRequest, TypeRegistry};
//!
//! let registry = Arc::new(TypeRegistry::new());
//! let log = EventLog::new(registry);
//!
//! let events = log.log(&conn, tid, &[EventInput::new("lock")])?;
//! assert_eq!(events[0].icon, "fa-lock");
//!
//! log.purge(&conn, tid, &PurgeRequest::All)?;
//! assert!(log.get(&conn, tid)?.is_empty());
//! ```
//!
//! Not-found conditions are never errors anywhere in this crate: reading an
//! unlogged topic returns empty, purging absent topics or ids is a silent
//! no-op, and resolving an unknown type key falls back to generic metadata.
//! The log is safe to query and purge speculatively.

mod error;
mod event;
mod log;
mod registry;
pub mod store;

pub use error::EventError;
pub use event::{EnrichedEvent, EventInput, TopicEvent};
pub use log::EventLog;
pub use registry::TypeRegistry;
pub use store::PurgeRequest;

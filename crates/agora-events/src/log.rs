//! The public event log facade.

use std::sync::Arc;

use chrono::Utc;
use rusqlite::Connection;

use crate::error::EventError;
use crate::event::{timestamp_iso, EnrichedEvent, EventInput, TopicEvent};
use crate::registry::TypeRegistry;
use crate::store::{self, PurgeRequest};

/// Per-topic audit log of typed lifecycle events.
///
/// Ties the type registry and the event store together: callers log raw
/// inputs, and reads come back enriched with registry display metadata and
/// a human-readable timestamp. The registry is injected at construction so
/// embedders and tests control its lifecycle explicitly.
pub struct EventLog {
    registry: Arc<TypeRegistry>,
}

impl EventLog {
    /// Creates an event log over the given registry.
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    /// The registry backing this log.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Initializes the type registry. Idempotent; exposed so callers can
    /// force re-initialization by calling [`TypeRegistry::reset`] first.
    pub fn init(&self) -> Result<(), EventError> {
        self.registry.init()?;
        Ok(())
    }

    /// Logs one or more events against a topic, in call order.
    ///
    /// Each input must carry a non-empty type key. Returns the created
    /// events enriched with display metadata — always a vector, preserving
    /// call order.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidEventType`] if any input's type key is
    /// empty; nothing is written in that case. Storage and registry errors
    /// propagate unmodified.
    pub fn log(
        &self,
        conn: &Connection,
        tid: i64,
        inputs: &[EventInput],
    ) -> Result<Vec<EnrichedEvent>, EventError> {
        for input in inputs {
            if input.event_type.trim().is_empty() {
                return Err(EventError::InvalidEventType(input.event_type.clone()));
            }
        }

        self.ensure_ready()?;

        let mut events = Vec::with_capacity(inputs.len());
        for input in inputs {
            let now = Utc::now().timestamp_millis();
            let record = store::append(conn, tid, &input.event_type, now, input.payload.clone())?;
            events.push(self.enrich(record));
        }
        Ok(events)
    }

    /// Returns all events of a topic in chronological order, enriched.
    ///
    /// A topic with no events yields an empty vector, never an error.
    pub fn get(&self, conn: &Connection, tid: i64) -> Result<Vec<EnrichedEvent>, EventError> {
        self.ensure_ready()?;

        let records = store::read_all(conn, tid)?;
        Ok(records.into_iter().map(|r| self.enrich(r)).collect())
    }

    /// Returns all events of a topic newest-first, enriched.
    pub fn get_reverse(
        &self,
        conn: &Connection,
        tid: i64,
    ) -> Result<Vec<EnrichedEvent>, EventError> {
        let mut events = self.get(conn, tid)?;
        events.reverse();
        Ok(events)
    }

    /// Returns the number of events currently logged for a topic.
    pub fn count(&self, conn: &Connection, tid: i64) -> Result<usize, EventError> {
        store::count(conn, tid)
    }

    /// Removes events from a topic's log.
    ///
    /// Always succeeds for non-existent or already-purged topics, and is
    /// safe to call repeatedly. After [`PurgeRequest::All`], the topic's
    /// index key no longer exists and [`get`](Self::get) returns empty.
    pub fn purge(
        &self,
        conn: &Connection,
        tid: i64,
        request: &PurgeRequest,
    ) -> Result<(), EventError> {
        store::delete(conn, tid, request)
    }

    fn ensure_ready(&self) -> Result<(), EventError> {
        if !self.registry.is_ready() {
            self.registry.init()?;
        }
        Ok(())
    }

    /// Merges registry display metadata into a stored record.
    ///
    /// Registry extras overwrite caller payload fields on collision, the
    /// same precedence contributions have at table-merge time.
    fn enrich(&self, record: TopicEvent) -> EnrichedEvent {
        let meta = self.registry.resolve(&record.event_type);

        let mut fields = record.payload;
        for (key, value) in meta.extra {
            fields.insert(key, value);
        }

        EnrichedEvent {
            id: record.id,
            icon: meta.icon,
            text: meta.text,
            timestamp: record.timestamp,
            timestamp_iso: timestamp_iso(record.timestamp),
            event_type: record.event_type,
            fields,
        }
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(Arc::new(TypeRegistry::new()))
    }
}

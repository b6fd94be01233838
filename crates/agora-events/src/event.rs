//! Topic event record, input, and wire types.

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied input for logging one event.
///
/// The type key is mandatory; everything else the caller attaches rides
/// along in the payload bag and is merged into the stored record at
/// creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventInput {
    /// The event type key, resolved against the type registry at read time.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Additional caller-defined fields.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl EventInput {
    /// Creates an input with the given type key and no payload fields.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            payload: Map::new(),
        }
    }

    /// Attaches a payload field, returning the modified input.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }
}

/// A stored topic event record.
///
/// This is the persisted shape: fixed core fields plus the open payload bag
/// merged at creation time. Records are immutable once written and are
/// destroyed only by purging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicEvent {
    /// Globally unique event id, assigned from an atomic counter.
    pub id: i64,

    /// The event type key.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Creation instant, in epoch milliseconds.
    pub timestamp: i64,

    /// Caller-defined fields merged at creation time.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// A topic event enriched with registry display metadata.
///
/// This is the wire contract consumers depend on: `id`, `icon`, `text`,
/// `timestamp`, `timestampISO`, `type`, plus every contributed extra field
/// flattened into the object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedEvent {
    /// Globally unique event id.
    pub id: i64,

    /// Icon token resolved from the type registry.
    pub icon: String,

    /// Display label resolved from the type registry.
    pub text: String,

    /// Creation instant, in epoch milliseconds.
    pub timestamp: i64,

    /// Human-readable creation instant (RFC 3339).
    #[serde(rename = "timestampISO")]
    pub timestamp_iso: String,

    /// The event type key.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Contributed fields: caller payload merged with registry extras.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Renders an epoch-millisecond timestamp as an RFC 3339 string.
pub(crate) fn timestamp_iso(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

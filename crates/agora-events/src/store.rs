//! Persistence operations for the per-topic event log.
//!
//! Events live in the storage layer under two key families: the record body
//! under `topicEvent:<id>` and the per-topic ordered id index under
//! `topic:<tid>:events`. Every id in the index corresponds to exactly one
//! record and vice versa; [`append`] and [`delete`] each run inside a single
//! transaction so the correspondence survives partial failure and repeated
//! calls.

use rusqlite::Connection;
use serde_json::{Map, Value};

use crate::error::EventError;
use crate::event::TopicEvent;

/// Counter key from which event ids are assigned.
const EVENT_ID_COUNTER: &str = "nextTopicEventId";

fn index_key(tid: i64) -> String {
    format!("topic:{tid}:events")
}

fn event_key(id: i64) -> String {
    format!("topicEvent:{id}")
}

/// What to remove from a topic's event log.
///
/// A tagged request rather than an optional id list: removing everything is
/// an explicit choice, and an empty subset removes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurgeRequest {
    /// Remove every event and the index itself.
    All,
    /// Remove exactly these event ids, leaving the rest intact.
    Subset(Vec<i64>),
}

/// Appends one event to a topic's log.
///
/// Assigns the next id from the atomic event counter, writes the record
/// body, then appends the id to the topic's index — all in one transaction,
/// so a record is always fully written before its id becomes reachable and
/// no partial append can survive.
pub fn append(
    conn: &Connection,
    tid: i64,
    event_type: &str,
    timestamp: i64,
    payload: Map<String, Value>,
) -> Result<TopicEvent, EventError> {
    let tx = conn.unchecked_transaction()?;

    let id = agora_db::incr(&tx, EVENT_ID_COUNTER)?;
    let event = TopicEvent {
        id,
        event_type: event_type.to_string(),
        timestamp,
        payload,
    };

    agora_db::kv_set(&tx, &event_key(id), &serde_json::to_string(&event)?)?;
    agora_db::list_append(&tx, &index_key(tid), &id.to_string())?;

    tx.commit()?;
    Ok(event)
}

/// Reads all events of a topic in chronological (insertion) order.
///
/// Ids whose record is missing — purged between the index read and the
/// record fetch — are skipped silently. A topic with no index at all yields
/// an empty vector, not an error.
pub fn read_all(conn: &Connection, tid: i64) -> Result<Vec<TopicEvent>, EventError> {
    let ids = agora_db::list_range(conn, &index_key(tid))?;

    let mut events = Vec::with_capacity(ids.len());
    for id in ids {
        match agora_db::kv_get(conn, &format!("topicEvent:{id}"))? {
            Some(raw) => events.push(serde_json::from_str(&raw)?),
            None => continue,
        }
    }
    Ok(events)
}

/// Returns the number of events currently indexed for a topic.
pub fn count(conn: &Connection, tid: i64) -> Result<usize, EventError> {
    Ok(agora_db::list_len(conn, &index_key(tid))?)
}

/// Removes events from a topic's log.
///
/// With [`PurgeRequest::All`], removes every record reachable from the
/// current index and then the index itself. With [`PurgeRequest::Subset`],
/// removes exactly the given records and index members, leaving the rest
/// retrievable. Runs in one transaction. Absent topics, absent ids, and
/// repeated calls are silent no-ops.
pub fn delete(conn: &Connection, tid: i64, request: &PurgeRequest) -> Result<(), EventError> {
    let index = index_key(tid);
    let tx = conn.unchecked_transaction()?;

    match request {
        PurgeRequest::All => {
            let ids = agora_db::list_range(&tx, &index)?;
            let record_keys: Vec<String> =
                ids.iter().map(|id| format!("topicEvent:{id}")).collect();
            agora_db::kv_delete(&tx, &record_keys)?;
            agora_db::list_delete(&tx, &index)?;
            tracing::debug!(topic = tid, removed = ids.len(), "purged topic event log");
        }
        PurgeRequest::Subset(ids) => {
            let record_keys: Vec<String> = ids.iter().map(|id| event_key(*id)).collect();
            let members: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
            agora_db::kv_delete(&tx, &record_keys)?;
            agora_db::list_remove(&tx, &index, &members)?;
        }
    }

    tx.commit()?;
    Ok(())
}

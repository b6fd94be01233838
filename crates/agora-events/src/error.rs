//! Error types for the topic event log.

/// Errors that can occur during event log operations.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// An event input carried a missing or empty type key.
    #[error("invalid event type: {0:?}")]
    InvalidEventType(String),

    /// A storage operation failed.
    #[error("event store error: {0}")]
    Store(#[from] agora_db::StoreError),

    /// A database transaction failed.
    #[error("event database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization or deserialization failed.
    #[error("event serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A type contributor failed during registry initialization.
    #[error(transparent)]
    Contribution(#[from] agora_types::ContributeError),
}

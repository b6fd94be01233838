//! Storage layer for the Agora platform.
//!
//! Provides SQLite connection pooling (via `r2d2`), WAL-mode initialization,
//! embedded SQL migrations, and the generic key-value / ordered-list /
//! counter operations higher layers build on. Every table is created through
//! versioned migrations managed by this crate.
//!
//! Higher layers address storage exclusively through opaque composite string
//! keys (e.g. `topic:42:events`), never through their own tables. Three
//! primitives cover the access patterns:
//!
//! - **Key-value** (`kv_set`, `kv_get`, `kv_delete`, `kv_exists`): record
//!   bodies, stored as strings.
//! - **Ordered lists** (`list_append`, `list_range`, `list_remove`,
//!   `list_delete`, `list_exists`, `list_len`): per-key sequences whose
//!   insertion order is preserved. Positions are assigned inside the INSERT
//!   itself, so concurrent appends cannot collide or lose entries.
//! - **Counters** (`incr`): atomic increment-and-fetch, used for id
//!   assignment across connections and processes.
//!
//! # Design decisions
//!
//! - **SQLite with WAL mode**: no external database process required. WAL
//!   allows concurrent readers with a single writer, which matches the
//!   access pattern of the layers above.
//! - **`r2d2` connection pool**: bounded connection reuse without manual
//!   lifetime management.
//! - **Embedded migrations**: SQL files are compiled into the binary via
//!   `include_str!`, ensuring migrations ship with the code that depends on
//!   them.

mod kv;
mod migrations;
mod pool;

pub use kv::{
    incr, kv_delete, kv_exists, kv_get, kv_set, list_append, list_delete, list_exists, list_len,
    list_range, list_remove, StoreError,
};
pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};

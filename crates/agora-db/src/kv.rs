//! Generic key-value, ordered-list, and counter operations.
//!
//! Higher layers address storage through opaque composite string keys and
//! never touch the underlying tables directly. All mutation primitives here
//! are single statements, so they are atomic on their own; callers that need
//! multi-step atomicity wrap them in a transaction.
//!
//! Deletion primitives are silent no-ops for absent keys and members. The
//! layers above lean on this: speculative deletes must not fail.

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database operation failed.
    #[error("store database error: {0}")]
    Database(#[from] rusqlite::Error),
}

// ── Key-value ────────────────────────────────────────────────────────

/// Sets a key to a value, overwriting any previous value.
pub fn kv_set(conn: &Connection, key: &str, value: &str) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Reads the value stored under a key, or `None` if the key is absent.
pub fn kv_get(conn: &Connection, key: &str) -> Result<Option<String>, StoreError> {
    let value = conn
        .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value)
}

/// Deletes the given keys. Absent keys are ignored.
pub fn kv_delete(conn: &Connection, keys: &[String]) -> Result<(), StoreError> {
    for key in keys {
        conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
    }
    Ok(())
}

/// Reports whether a key currently holds a value.
pub fn kv_exists(conn: &Connection, key: &str) -> Result<bool, StoreError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM kv_store WHERE key = ?1)",
        [key],
        |row| row.get(0),
    )?;
    Ok(exists)
}

// ── Counters ─────────────────────────────────────────────────────────

/// Atomically increments a counter and returns the new value.
///
/// The first increment of a key yields 1. The increment-and-fetch happens
/// in a single statement, so concurrent callers — including other processes
/// sharing the database file — always receive distinct values.
pub fn incr(conn: &Connection, key: &str) -> Result<i64, StoreError> {
    let value = conn.query_row(
        "INSERT INTO counters (key, value) VALUES (?1, 1)
         ON CONFLICT(key) DO UPDATE SET value = value + 1
         RETURNING value",
        [key],
        |row| row.get(0),
    )?;
    Ok(value)
}

// ── Ordered lists ────────────────────────────────────────────────────

/// Appends an item to the tail of a list.
///
/// The position is computed with a `COALESCE(MAX(pos), 0) + 1` subquery
/// inside the INSERT itself, eliminating the read-modify-write race where
/// two concurrent appenders could observe the same tail position.
pub fn list_append(conn: &Connection, key: &str, item: &str) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO list_store (key, pos, item)
         VALUES (
            ?1,
            (SELECT COALESCE(MAX(pos), 0) + 1 FROM list_store WHERE key = ?1),
            ?2
         )",
        params![key, item],
    )?;
    Ok(())
}

/// Returns all items of a list in insertion order.
///
/// An absent list yields an empty vector, not an error.
pub fn list_range(conn: &Connection, key: &str) -> Result<Vec<String>, StoreError> {
    let mut stmt =
        conn.prepare("SELECT item FROM list_store WHERE key = ?1 ORDER BY pos ASC")?;
    let rows = stmt.query_map([key], |row| row.get(0))?;

    let mut items = Vec::new();
    for row in rows {
        items.push(row?);
    }
    Ok(items)
}

/// Removes the given members from a list, leaving the remainder in order.
///
/// Members not present in the list are ignored.
pub fn list_remove(conn: &Connection, key: &str, items: &[String]) -> Result<(), StoreError> {
    for item in items {
        conn.execute(
            "DELETE FROM list_store WHERE key = ?1 AND item = ?2",
            params![key, item],
        )?;
    }
    Ok(())
}

/// Deletes a list entirely, key included. Absent lists are ignored.
pub fn list_delete(conn: &Connection, key: &str) -> Result<(), StoreError> {
    conn.execute("DELETE FROM list_store WHERE key = ?1", [key])?;
    Ok(())
}

/// Reports whether a list currently has any members.
pub fn list_exists(conn: &Connection, key: &str) -> Result<bool, StoreError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM list_store WHERE key = ?1)",
        [key],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Returns the number of members in a list. Absent lists count zero.
pub fn list_len(conn: &Connection, key: &str) -> Result<usize, StoreError> {
    let len: i64 = conn.query_row(
        "SELECT COUNT(*) FROM list_store WHERE key = ?1",
        [key],
        |row| row.get(0),
    )?;
    Ok(len as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run_migrations;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        run_migrations(&conn).expect("migrations should succeed");
        conn
    }

    #[test]
    fn kv_set_get_overwrite() {
        let conn = test_db();

        kv_set(&conn, "a", "1").expect("set");
        assert_eq!(kv_get(&conn, "a").expect("get"), Some("1".to_string()));

        kv_set(&conn, "a", "2").expect("overwrite");
        assert_eq!(kv_get(&conn, "a").expect("get"), Some("2".to_string()));
    }

    #[test]
    fn kv_get_missing_is_none() {
        let conn = test_db();
        assert_eq!(kv_get(&conn, "nope").expect("get"), None);
    }

    #[test]
    fn kv_exists_tracks_delete() {
        let conn = test_db();

        kv_set(&conn, "a", "1").expect("set");
        assert!(kv_exists(&conn, "a").expect("exists"));

        kv_delete(&conn, &["a".to_string()]).expect("delete");
        assert!(!kv_exists(&conn, "a").expect("exists"));
    }

    #[test]
    fn kv_delete_absent_keys_is_noop() {
        let conn = test_db();
        kv_delete(&conn, &["ghost".to_string(), "phantom".to_string()]).expect("delete");
    }

    #[test]
    fn incr_starts_at_one_and_counts_up() {
        let conn = test_db();

        assert_eq!(incr(&conn, "seq").expect("incr"), 1);
        assert_eq!(incr(&conn, "seq").expect("incr"), 2);
        assert_eq!(incr(&conn, "seq").expect("incr"), 3);
    }

    #[test]
    fn counters_are_independent_per_key() {
        let conn = test_db();

        incr(&conn, "a").expect("incr");
        incr(&conn, "a").expect("incr");
        assert_eq!(incr(&conn, "b").expect("incr"), 1);
    }

    #[test]
    fn list_append_preserves_order() {
        let conn = test_db();

        for item in ["x", "y", "z"] {
            list_append(&conn, "l", item).expect("append");
        }

        assert_eq!(list_range(&conn, "l").expect("range"), vec!["x", "y", "z"]);
    }

    #[test]
    fn list_range_missing_is_empty() {
        let conn = test_db();
        assert!(list_range(&conn, "nope").expect("range").is_empty());
    }

    #[test]
    fn list_remove_leaves_remainder_in_order() {
        let conn = test_db();

        for item in ["a", "b", "c", "d"] {
            list_append(&conn, "l", item).expect("append");
        }

        list_remove(&conn, "l", &["b".to_string(), "d".to_string()]).expect("remove");
        assert_eq!(list_range(&conn, "l").expect("range"), vec!["a", "c"]);
        assert!(list_exists(&conn, "l").expect("exists"));
    }

    #[test]
    fn list_remove_absent_members_is_noop() {
        let conn = test_db();

        list_append(&conn, "l", "a").expect("append");
        list_remove(&conn, "l", &["ghost".to_string()]).expect("remove");
        assert_eq!(list_range(&conn, "l").expect("range"), vec!["a"]);
    }

    #[test]
    fn list_delete_removes_key() {
        let conn = test_db();

        list_append(&conn, "l", "a").expect("append");
        list_delete(&conn, "l").expect("delete");

        assert!(!list_exists(&conn, "l").expect("exists"));
        assert!(list_range(&conn, "l").expect("range").is_empty());

        // Deleting again is a no-op.
        list_delete(&conn, "l").expect("delete twice");
    }

    #[test]
    fn list_len_counts_members() {
        let conn = test_db();

        assert_eq!(list_len(&conn, "l").expect("len"), 0);
        list_append(&conn, "l", "a").expect("append");
        list_append(&conn, "l", "b").expect("append");
        assert_eq!(list_len(&conn, "l").expect("len"), 2);
    }

    #[test]
    fn lists_are_isolated_per_key() {
        let conn = test_db();

        list_append(&conn, "l1", "a").expect("append");
        list_append(&conn, "l2", "b").expect("append");

        assert_eq!(list_range(&conn, "l1").expect("range"), vec!["a"]);
        assert_eq!(list_range(&conn, "l2").expect("range"), vec!["b"]);
    }
}

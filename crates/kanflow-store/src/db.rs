//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, io_error, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Per-connection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// How long a writer waits for the database lock before `SQLITE_BUSY`
    pub busy_timeout_ms: u64,
    /// Use write-ahead logging (ignored for in-memory databases)
    pub wal: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
            wal: true,
        }
    }
}

/// Open a SQLite database at the given path with default options
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    open_with(path, &StoreOptions::default())
}

/// Open a SQLite database at the given path, creating parent directories
pub fn open_with<P: AsRef<Path>>(path: P, options: &StoreOptions) -> Result<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_error("db_open", e))?;
        }
    }

    let conn = Connection::open(path).map_err(from_rusqlite)?;
    configure(&conn, options)?;
    tracing::debug!(path = %path.display(), wal = options.wal, "Opened database");
    Ok(conn)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
    configure(
        &conn,
        &StoreOptions {
            wal: false,
            ..StoreOptions::default()
        },
    )?;
    Ok(conn)
}

/// Configure a connection
pub fn configure(conn: &Connection, options: &StoreOptions) -> Result<()> {
    // Cascading deletes depend on this
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(from_rusqlite)?;

    conn.busy_timeout(Duration::from_millis(options.busy_timeout_ms))
        .map_err(from_rusqlite)?;

    if options.wal {
        // journal_mode answers with the resulting mode, so it must be queried
        let mode: String = conn
            .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        tracing::debug!(journal_mode = %mode, "Configured journal mode");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = open_in_memory().unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.db");

        let conn = open(&path).unwrap();
        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();

        assert!(path.exists());
        assert_eq!(mode.to_lowercase(), "wal");
    }
}

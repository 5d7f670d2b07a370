//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for the `kv_entries` table.
//! - Apply backing migrations before exposing the store.
//!
//! # Invariants
//! - A constructed store always sees a fully migrated schema.
//! - Each `set` is a single UPSERT statement, so readers never see a
//!   half-written value.

use super::migrations::{apply_migrations, current_user_version, latest_version};
use super::{KeyValueStore, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Key-value store persisted in a SQLite database.
#[derive(Debug)]
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Opens (or creates) a database file and applies pending migrations.
    ///
    /// # Side effects
    /// - Emits `kv_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        open_logged("file", || Connection::open(path))
    }

    /// Opens a private in-memory database and applies migrations.
    pub fn open_in_memory() -> StorageResult<Self> {
        open_logged("memory", Connection::open_in_memory)
    }

    /// Wraps an externally opened connection that is already migrated.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not match
    ///   the latest known version.
    pub fn from_connection(conn: Connection) -> StorageResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(&conn)?;
        if actual_version != expected_version {
            return Err(StorageError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    /// Underlying connection, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

fn open_logged(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StorageResult<SqliteKeyValueStore> {
    let started_at = Instant::now();
    info!("event=kv_open module=storage status=start mode={mode}");

    let mut conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=kv_open module=storage status=error mode={mode} duration_ms={} error_code=kv_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=kv_open module=storage status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(SqliteKeyValueStore { conn })
        }
        Err(err) => {
            error!(
                "event=kv_open module=storage status=error mode={mode} duration_ms={} error_code=kv_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StorageResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}

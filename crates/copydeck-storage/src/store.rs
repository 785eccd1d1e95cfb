// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`KeyValueStore`] trait.

use std::path::Path;

use async_trait::async_trait;
use tokio_rusqlite::Connection;
use tracing::debug;

use copydeck_core::{CopydeckError, KeyValueStore};

/// Helper to convert tokio_rusqlite errors into CopydeckError::Storage.
fn storage_err(e: tokio_rusqlite::Error) -> CopydeckError {
    CopydeckError::Storage {
        source: Box::new(e),
    }
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS kv_entries (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

/// Durable key-value store backed by one SQLite database file.
///
/// Values are opaque strings (the cache layer stores JSON blobs). WAL mode
/// keeps reads cheap while the single background writer serializes writes.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Opens (or creates) the database at `path` and applies the schema.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, CopydeckError> {
        let conn = Connection::open(path.as_ref())
            .await
            .map_err(|e| storage_err(e.into()))?;
        conn.call(|conn| {
            conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
        .map_err(storage_err)?;
        debug!(path = %path.as_ref().display(), "kv store opened");
        Ok(Self { conn })
    }

    /// In-memory database, for tests and throwaway sessions.
    pub async fn open_in_memory() -> Result<Self, CopydeckError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| storage_err(e.into()))?;
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
        .map_err(storage_err)?;
        Ok(Self { conn })
    }

    /// Flushes the WAL and closes cleanly.
    pub async fn close(&self) -> Result<(), CopydeckError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(storage_err)
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CopydeckError> {
        let key = key.to_string();
        self.conn
            .call(move |conn| {
                use rusqlite::OptionalExtension;
                let value = conn
                    .query_row(
                        "SELECT value FROM kv_entries WHERE key = ?1",
                        rusqlite::params![key],
                        |row| row.get::<_, String>(0),
                    )
                    .optional()?;
                Ok(value)
            })
            .await
            .map_err(storage_err)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CopydeckError> {
        let key = key.to_string();
        let value = value.to_string();
        let now = chrono::Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                    rusqlite::params![key, value, now],
                )?;
                Ok(())
            })
            .await
            .map_err(storage_err)
    }

    async fn remove(&self, key: &str) -> Result<(), CopydeckError> {
        let key = key.to_string();
        self.conn
            .call(move |conn| {
                conn.execute(
                    "DELETE FROM kv_entries WHERE key = ?1",
                    rusqlite::params![key],
                )?;
                Ok(())
            })
            .await
            .map_err(storage_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_overwrite_remove() {
        let store = SqliteKvStore::open_in_memory().await.unwrap();

        assert_eq!(store.get("missing").await.unwrap(), None);

        store.set("k", "v1").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v1"));

        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copydeck.db");

        {
            let store = SqliteKvStore::open(&path).await.unwrap();
            store.set("durable", "yes").await.unwrap();
            store.close().await.unwrap();
        }

        let store = SqliteKvStore::open(&path).await.unwrap();
        assert_eq!(store.get("durable").await.unwrap().as_deref(), Some("yes"));
    }

    #[tokio::test]
    async fn keys_are_case_sensitive() {
        let store = SqliteKvStore::open_in_memory().await.unwrap();
        store.set("Instagram::Feed", "a").await.unwrap();
        assert_eq!(store.get("instagram::feed").await.unwrap(), None);
    }
}

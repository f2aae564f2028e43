// src/infrastructure/repositories/sqlite/kv_store.rs
use super::connection::open_connection;
use super::error::{SqliteRepositoryError, SqliteResult};
use crate::domain::bookmark::now_millis;
use crate::domain::error::DomainResult;
use crate::domain::repositories::store::{KeyValueStore, Namespace};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Mutex, MutexGuard};
use tracing::{instrument, trace};

/// Namespaces stored as rows of a single sqlite table.
#[derive(Debug)]
pub struct SqliteKeyValueStore {
    conn: Mutex<Connection>,
}

impl SqliteKeyValueStore {
    pub fn from_path(path: &str) -> SqliteResult<Self> {
        Ok(Self {
            conn: Mutex::new(open_connection(path)?),
        })
    }

    fn connection(&self) -> SqliteResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| SqliteRepositoryError::LockPoisoned(e.to_string()))
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    #[instrument(skip(self), level = "trace")]
    fn read(&self, namespace: Namespace) -> DomainResult<Option<String>> {
        let conn = self.connection()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv WHERE namespace = ?1",
                params![namespace.key()],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(SqliteRepositoryError::from)?;
        Ok(value)
    }

    #[instrument(skip(self, value), level = "trace")]
    fn write(&self, namespace: Namespace, value: &str) -> DomainResult<()> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO kv (namespace, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(namespace) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![namespace.key(), value, now_millis()],
        )
        .map_err(SqliteRepositoryError::from)?;
        trace!("Wrote {} bytes to {}", value.len(), namespace);
        Ok(())
    }
}

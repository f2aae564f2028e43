// src/infrastructure/repositories/sqlite/connection.rs
use super::error::{SqliteRepositoryError, SqliteResult};
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

const SCHEMA_VERSION: i32 = 1;

const CREATE_KV_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS kv (
        namespace  TEXT PRIMARY KEY NOT NULL,
        value      TEXT NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// Open (creating if needed) the store database at `path` and bring its schema up to date.
#[instrument(level = "debug")]
pub fn open_connection(path: &str) -> SqliteResult<Connection> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating store directory {:?}", parent);
            fs::create_dir_all(parent).map_err(SqliteRepositoryError::IoError)?;
        }
    }

    let conn = Connection::open(path)?;
    // every write is durable before the call returns
    conn.pragma_update(None, "synchronous", "FULL")?;
    run_migrations(&conn)?;
    info!("Store opened at {}", path);
    Ok(conn)
}

fn run_migrations(conn: &Connection) -> SqliteResult<()> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if version > SCHEMA_VERSION {
        return Err(SqliteRepositoryError::MigrationError(format!(
            "Store schema version {} is newer than supported version {}",
            version, SCHEMA_VERSION
        )));
    }
    if version == SCHEMA_VERSION {
        debug!("No pending migrations to run");
        return Ok(());
    }

    conn.execute_batch(CREATE_KV_TABLE)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    info!("Store schema migrated from version {} to {}", version, SCHEMA_VERSION);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_missing_directory_when_open_then_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/oriby.db");
        let conn = open_connection(path.to_str().unwrap()).unwrap();
        let version: i32 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
        assert!(path.exists());
    }

    #[test]
    fn given_newer_schema_when_open_then_migration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.pragma_update(None, "user_version", 99).unwrap();
        }
        let result = open_connection(path.to_str().unwrap());
        assert!(matches!(result, Err(SqliteRepositoryError::MigrationError(_))));
    }
}

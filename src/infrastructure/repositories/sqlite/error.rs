// src/infrastructure/repositories/sqlite/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqliteRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Connection lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

pub type SqliteResult<T> = Result<T, SqliteRepositoryError>;

impl From<SqliteRepositoryError> for crate::domain::error::DomainError {
    fn from(err: SqliteRepositoryError) -> Self {
        match err {
            SqliteRepositoryError::IoError(e) => crate::domain::error::DomainError::Io(e),
            other => crate::domain::error::DomainError::Storage(other.to_string()),
        }
    }
}

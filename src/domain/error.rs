// src/domain/error.rs
use crate::domain::repositories::store::Namespace;
use thiserror::Error;

/// Coarse classification of failures, stable across error message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUrl,
    ReadOnlyViolation,
    FetchFailed,
    ImportFailed,
    CorruptState,
    CategoryInUse,
    CategoryNotFound,
    Storage,
    Other,
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Bookmark '{0}' comes from the server and is read-only")]
    ReadOnlyViolation(String),

    #[error("Fetching server bookmarks failed: {0}")]
    FetchFailed(String),

    #[error("Import failed: {0}")]
    ImportFailed(String),

    #[error("Stored data for '{namespace}' is unreadable: {reason}")]
    CorruptState { namespace: Namespace, reason: String },

    #[error("Category '{0}' is the default category and cannot be deleted")]
    CategoryInUse(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            DomainError::ReadOnlyViolation(_) => ErrorKind::ReadOnlyViolation,
            DomainError::FetchFailed(_) => ErrorKind::FetchFailed,
            DomainError::ImportFailed(_) => ErrorKind::ImportFailed,
            DomainError::CorruptState { .. } => ErrorKind::CorruptState,
            DomainError::CategoryInUse(_) => ErrorKind::CategoryInUse,
            DomainError::CategoryNotFound(_) => ErrorKind::CategoryNotFound,
            DomainError::Storage(_) | DomainError::Io(_) => ErrorKind::Storage,
            DomainError::Other(_) => ErrorKind::Other,
        }
    }

    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            DomainError::Storage(msg) => DomainError::Storage(format!("{}: {}", context.into(), msg)),
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context.into(), msg)),
            err => err,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

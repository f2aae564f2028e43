// src/application/error.rs
use crate::domain::error::{DomainError, ErrorKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Bookmark not found with ID {0}")]
    BookmarkNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Other(String),
}

impl ApplicationError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            ApplicationError::Other(msg) => {
                ApplicationError::Other(format!("{}: {}", context.into(), msg))
            }
            ApplicationError::Domain(err) => ApplicationError::Domain(err.context(context)),
            ApplicationError::Validation(msg) => {
                ApplicationError::Validation(format!("{}: {}", context.into(), msg))
            }
            err => ApplicationError::Other(format!("{}: {}", context.into(), err)),
        }
    }

    /// Classification of the underlying domain failure, if any.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ApplicationError::Domain(err) => Some(err.kind()),
            _ => None,
        }
    }

    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind() == Some(kind)
    }
}

impl From<std::io::Error> for ApplicationError {
    fn from(err: std::io::Error) -> Self {
        ApplicationError::Domain(DomainError::Io(err))
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;

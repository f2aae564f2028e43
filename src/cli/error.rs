// src/cli/error.rs
use crate::application::error::ApplicationError;
use crate::domain::error::DomainError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            CliError::InvalidInput(msg) => {
                CliError::InvalidInput(format!("{}: {}", context.into(), msg))
            }
            CliError::Application(err) => CliError::Application(err.context(context)),
            CliError::Other(msg) => CliError::Other(format!("{}: {}", context.into(), msg)),
            err => CliError::Other(format!("{}: {}", context.into(), err)),
        }
    }
}

// Direct conversion from DomainError to CliError (via ApplicationError)
impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Application(ApplicationError::Domain(err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Other(format!("JSON output failed: {}", err))
    }
}

pub type CliResult<T> = Result<T, CliError>;

// src/domain/repositories/remote.rs
use crate::domain::error::DomainResult;
use std::fmt::Debug;

/// Source of the remote bookmark document.
///
/// Implementations return the raw body of a successful retrieval and map
/// every transport failure or non-success status to `DomainError::FetchFailed`.
pub trait RemoteBookmarkSource: Send + Sync + Debug {
    fn fetch(&self, url: &str) -> DomainResult<String>;
}

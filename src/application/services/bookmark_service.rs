// src/application/services/bookmark_service.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::bookmark::{Bookmark, BookmarkDraft};
use crate::domain::search::BookmarkFilter;
use crate::domain::settings::SourceFilter;
use std::fmt::Debug;

/// Result of a full load: the merged list plus the outcome of the refresh that preceded it.
#[derive(Debug)]
pub struct LoadedBookmarks {
    pub bookmarks: Vec<Bookmark>,
    pub source: SourceFilter,
    /// Set when the remote refresh failed and the cached server list was used
    pub fetch_error: Option<ApplicationError>,
}

/// Service interface for the merged view over manual and server bookmarks
pub trait BookmarkService: Send + Sync + Debug {
    /// Read the partitions selected by `filter`, manual ones first, each tagged with its source.
    fn read(&self, filter: SourceFilter) -> ApplicationResult<Vec<Bookmark>>;

    /// Refresh the server cache if the configured source needs it, then read.
    fn load(&self) -> ApplicationResult<LoadedBookmarks>;

    /// Read and narrow by term and category.
    fn search(&self, source: SourceFilter, filter: &BookmarkFilter) -> ApplicationResult<Vec<Bookmark>>;

    /// Look up a bookmark in the merged set, manual partition first.
    fn get(&self, id: &str) -> ApplicationResult<Option<Bookmark>>;

    /// Create or update a manual bookmark.
    fn write(&self, draft: BookmarkDraft) -> ApplicationResult<Bookmark>;

    /// Delete a manual bookmark. Returns false if there was nothing to delete.
    fn remove(&self, id: &str) -> ApplicationResult<bool>;
}

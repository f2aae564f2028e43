// src/application/services/sync_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::bookmark::{generate_id, now_millis, Bookmark, BookmarkSource};
use crate::domain::favicon::{favicon_url, format_url, title_from_url};
use crate::domain::repositories::remote::RemoteBookmarkSource;
use crate::domain::repositories::store::StateStore;
use crate::infrastructure::json::{parse_remote_document, RemoteBookmark};
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Identifies one refresh; only the most recently issued ticket may write the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// Keeps the server partition in step with the remote document.
pub trait SyncService: Send + Sync + Debug {
    /// Fetch `url`, replace the server cache and return the new list.
    ///
    /// On failure the cache is left as it was.
    fn refresh(&self, url: &str) -> ApplicationResult<Vec<Bookmark>>;
}

#[derive(Debug)]
pub struct SyncServiceImpl {
    store: StateStore,
    remote: Arc<dyn RemoteBookmarkSource>,
    latest_ticket: AtomicU64,
}

impl SyncServiceImpl {
    pub fn new(store: StateStore, remote: Arc<dyn RemoteBookmarkSource>) -> Self {
        Self {
            store,
            remote,
            latest_ticket: AtomicU64::new(0),
        }
    }

    pub fn issue_ticket(&self) -> RefreshTicket {
        RefreshTicket(self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Write `bookmarks` as the new server cache unless a newer refresh was issued
    /// after `ticket`. Returns whether the cache was written.
    pub fn commit(&self, ticket: RefreshTicket, bookmarks: &[Bookmark]) -> ApplicationResult<bool> {
        let latest = self.latest_ticket.load(Ordering::SeqCst);
        if ticket.0 != latest {
            warn!(
                "Discarding stale refresh result (ticket {} superseded by {})",
                ticket.0, latest
            );
            return Ok(false);
        }
        self.store.set_server_bookmarks(bookmarks)?;
        Ok(true)
    }

    fn normalize(entry: RemoteBookmark, now: i64) -> Option<Bookmark> {
        let url = format_url(&entry.url);
        if url.is_empty() {
            warn!("Skipping remote bookmark with invalid URL '{}'", entry.url);
            return None;
        }

        let title = entry
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| title_from_url(&url))
            .unwrap_or_else(|| url.clone());
        let favicon = entry
            .favicon
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| favicon_url(&url));
        let id = entry
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| generate_id(BookmarkSource::Server));

        Some(Bookmark {
            id,
            title,
            url,
            favicon,
            category: entry.category.filter(|c| !c.is_empty()),
            created_at: entry.created_at.unwrap_or(now),
            source: BookmarkSource::Server,
        })
    }
}

impl SyncService for SyncServiceImpl {
    #[instrument(skip(self), level = "debug")]
    fn refresh(&self, url: &str) -> ApplicationResult<Vec<Bookmark>> {
        let ticket = self.issue_ticket();

        let body = self.remote.fetch(url).inspect_err(|e| {
            warn!("Remote fetch failed, keeping cached server bookmarks: {}", e);
        })?;
        let entries = parse_remote_document(&body).inspect_err(|e| {
            warn!("Remote document rejected, keeping cached server bookmarks: {}", e);
        })?;

        let now = now_millis();
        let bookmarks: Vec<Bookmark> = entries
            .into_iter()
            .filter_map(|entry| Self::normalize(entry, now))
            .collect();

        if self.commit(ticket, &bookmarks)? {
            info!("Cached {} server bookmarks from {}", bookmarks.len(), url);
        } else {
            debug!("Refresh of {} superseded before completion", url);
        }
        Ok(bookmarks)
    }
}

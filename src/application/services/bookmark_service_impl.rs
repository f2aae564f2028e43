// src/application/services/bookmark_service_impl.rs
use std::sync::Arc;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::bookmark_service::{BookmarkService, LoadedBookmarks};
use crate::application::services::sync_service::SyncService;
use crate::domain::bookmark::{generate_id, now_millis, Bookmark, BookmarkDraft, BookmarkSource};
use crate::domain::category::contains_category;
use crate::domain::error::DomainError;
use crate::domain::favicon::{favicon_url, title_from_url, validate_url};
use crate::domain::repositories::store::StateStore;
use crate::domain::search::BookmarkFilter;
use crate::domain::settings::SourceFilter;
use tracing::{debug, instrument, warn};

#[derive(Debug)]
pub struct BookmarkServiceImpl {
    store: StateStore,
    sync_service: Arc<dyn SyncService>,
}

impl BookmarkServiceImpl {
    pub fn new(store: StateStore, sync_service: Arc<dyn SyncService>) -> Self {
        Self {
            store,
            sync_service,
        }
    }

    fn ensure_not_server_owned(&self, id: &str) -> ApplicationResult<()> {
        let server = self.store.server_bookmarks()?;
        if server.iter().any(|b| b.id == id) {
            return Err(DomainError::ReadOnlyViolation(id.to_string()).into());
        }
        Ok(())
    }

    /// A category the record already carries is kept even after it was deleted.
    fn resolve_category(
        &self,
        requested: Option<String>,
        current: Option<&str>,
    ) -> ApplicationResult<String> {
        match requested.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()) {
            Some(category) if current == Some(category.as_str()) => Ok(category),
            Some(category) => {
                let categories = self.store.categories()?;
                if !contains_category(&categories, &category) {
                    return Err(DomainError::CategoryNotFound(category).into());
                }
                Ok(category)
            }
            None => Ok(self.store.settings()?.default_category),
        }
    }
}

impl BookmarkService for BookmarkServiceImpl {
    #[instrument(skip(self), level = "debug")]
    fn read(&self, filter: SourceFilter) -> ApplicationResult<Vec<Bookmark>> {
        let bookmarks = match filter {
            SourceFilter::Manual => self.store.manual_bookmarks()?,
            SourceFilter::Server => self.store.server_bookmarks()?,
            SourceFilter::Both => {
                let mut merged = self.store.manual_bookmarks()?;
                merged.extend(self.store.server_bookmarks()?);
                merged
            }
        };
        debug!("Read {} bookmarks for source '{}'", bookmarks.len(), filter);
        Ok(bookmarks)
    }

    #[instrument(skip(self), level = "debug")]
    fn load(&self) -> ApplicationResult<LoadedBookmarks> {
        let settings = self.store.settings()?;
        let source = settings.bookmark_source;

        let fetch_error = if source.includes(BookmarkSource::Server) {
            match self.sync_service.refresh(&settings.server_bookmarks_url) {
                Ok(_) => None,
                Err(e) => {
                    warn!("Using cached server bookmarks: {}", e);
                    Some(e)
                }
            }
        } else {
            None
        };

        Ok(LoadedBookmarks {
            bookmarks: self.read(source)?,
            source,
            fetch_error,
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn search(&self, source: SourceFilter, filter: &BookmarkFilter) -> ApplicationResult<Vec<Bookmark>> {
        Ok(filter.apply(self.read(source)?))
    }

    #[instrument(skip(self), level = "debug")]
    fn get(&self, id: &str) -> ApplicationResult<Option<Bookmark>> {
        Ok(self.read(SourceFilter::Both)?.into_iter().find(|b| b.id == id))
    }

    #[instrument(skip(self, draft), level = "debug", fields(id = ?draft.id, url = %draft.url))]
    fn write(&self, draft: BookmarkDraft) -> ApplicationResult<Bookmark> {
        let requested_id = draft.id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty());
        if let Some(id) = &requested_id {
            self.ensure_not_server_owned(id)?;
        }
        if draft.source == Some(BookmarkSource::Server) {
            debug!("Ignoring caller supplied server source, writes are always manual");
        }

        let url = validate_url(&draft.url)?;
        let title = match draft.title.trim() {
            "" => title_from_url(&url).ok_or_else(|| {
                ApplicationError::Validation("Title and URL are required".to_string())
            })?,
            title => title.to_string(),
        };
        let favicon = draft
            .favicon
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| favicon_url(&url));

        let mut manual = self.store.manual_bookmarks()?;
        let existing = requested_id
            .as_ref()
            .and_then(|id| manual.iter().position(|b| &b.id == id));
        let category = self.resolve_category(
            draft.category,
            existing.and_then(|i| manual[i].category.as_deref()),
        )?;

        let created_at = draft
            .created_at
            .or_else(|| existing.map(|i| manual[i].created_at))
            .unwrap_or_else(now_millis);

        let bookmark = Bookmark {
            id: requested_id.unwrap_or_else(|| generate_id(BookmarkSource::Manual)),
            title,
            url,
            favicon,
            category: Some(category),
            created_at,
            source: BookmarkSource::Manual,
        };

        match existing {
            Some(index) => {
                debug!("Updating bookmark {}", bookmark.id);
                manual[index] = bookmark.clone();
            }
            None => {
                debug!("Adding bookmark {}", bookmark.id);
                manual.push(bookmark.clone());
            }
        }
        self.store.set_manual_bookmarks(&manual)?;

        Ok(bookmark)
    }

    #[instrument(skip(self), level = "debug")]
    fn remove(&self, id: &str) -> ApplicationResult<bool> {
        self.ensure_not_server_owned(id)?;

        let mut manual = self.store.manual_bookmarks()?;
        let before = manual.len();
        manual.retain(|b| b.id != id);
        if manual.len() == before {
            debug!("No bookmark with id {}, nothing to delete", id);
            return Ok(false);
        }

        self.store.set_manual_bookmarks(&manual)?;
        Ok(true)
    }
}

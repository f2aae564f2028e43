// src/domain/repositories/store.rs
use crate::domain::bookmark::{Bookmark, BookmarkSource};
use crate::domain::category::{default_categories, BookmarkCategory};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::settings::AppSettings;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// The four independent partitions of persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    ManualBookmarks,
    ServerBookmarks,
    Categories,
    Settings,
}

impl Namespace {
    pub const ALL: [Namespace; 4] = [
        Namespace::ManualBookmarks,
        Namespace::ServerBookmarks,
        Namespace::Categories,
        Namespace::Settings,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Namespace::ManualBookmarks => "oriby_bookmarks",
            Namespace::ServerBookmarks => "oriby_server_bookmarks",
            Namespace::Categories => "oriby_categories",
            Namespace::Settings => "oriby_settings",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw persistence of one JSON text per namespace.
///
/// Every `write` must be durable when it returns.
pub trait KeyValueStore: fmt::Debug + Send + Sync {
    fn read(&self, namespace: Namespace) -> DomainResult<Option<String>>;
    fn write(&self, namespace: Namespace, value: &str) -> DomainResult<()>;
}

/// Typed access to the persisted partitions.
///
/// Absent namespaces read as their defaults; present but unparseable ones are
/// reported as [`DomainError::CorruptState`].
#[derive(Debug, Clone)]
pub struct StateStore {
    backend: Arc<dyn KeyValueStore>,
}

impl StateStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Persist defaults into every namespace that has never been written.
    #[instrument(skip(self), level = "debug")]
    pub fn initialize(&self) -> DomainResult<()> {
        for namespace in Namespace::ALL {
            if self.backend.read(namespace)?.is_some() {
                trace!("{} already initialized", namespace);
                continue;
            }
            debug!("Seeding {} with defaults", namespace);
            match namespace {
                Namespace::ManualBookmarks | Namespace::ServerBookmarks => {
                    self.write_json(namespace, &Vec::<Bookmark>::new())?
                }
                Namespace::Categories => self.write_json(namespace, &default_categories())?,
                Namespace::Settings => self.write_json(namespace, &AppSettings::default())?,
            }
        }
        Ok(())
    }

    /// Stored text of a namespace, `None` if never written.
    pub fn raw(&self, namespace: Namespace) -> DomainResult<Option<String>> {
        self.backend.read(namespace)
    }

    pub fn manual_bookmarks(&self) -> DomainResult<Vec<Bookmark>> {
        self.bookmarks(Namespace::ManualBookmarks, BookmarkSource::Manual)
    }

    pub fn set_manual_bookmarks(&self, bookmarks: &[Bookmark]) -> DomainResult<()> {
        self.write_json(Namespace::ManualBookmarks, &bookmarks)
    }

    pub fn server_bookmarks(&self) -> DomainResult<Vec<Bookmark>> {
        self.bookmarks(Namespace::ServerBookmarks, BookmarkSource::Server)
    }

    pub fn set_server_bookmarks(&self, bookmarks: &[Bookmark]) -> DomainResult<()> {
        self.write_json(Namespace::ServerBookmarks, &bookmarks)
    }

    pub fn categories(&self) -> DomainResult<Vec<BookmarkCategory>> {
        self.read_json(Namespace::Categories, default_categories)
    }

    pub fn set_categories(&self, categories: &[BookmarkCategory]) -> DomainResult<()> {
        self.write_json(Namespace::Categories, &categories)
    }

    pub fn settings(&self) -> DomainResult<AppSettings> {
        self.read_json(Namespace::Settings, AppSettings::default)
    }

    pub fn set_settings(&self, settings: &AppSettings) -> DomainResult<()> {
        self.write_json(Namespace::Settings, settings)
    }

    /// Records are tagged with the partition they were read from.
    fn bookmarks(&self, namespace: Namespace, source: BookmarkSource) -> DomainResult<Vec<Bookmark>> {
        let bookmarks: Vec<Bookmark> = self.read_json(namespace, Vec::new)?;
        Ok(bookmarks
            .into_iter()
            .map(|b| b.with_source(source))
            .collect())
    }

    fn read_json<T, F>(&self, namespace: Namespace, default: F) -> DomainResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.backend.read(namespace)? {
            None => {
                trace!("{} absent, using default", namespace);
                Ok(default())
            }
            Some(text) => serde_json::from_str(&text).map_err(|e| DomainError::CorruptState {
                namespace,
                reason: e.to_string(),
            }),
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, namespace: Namespace, value: &T) -> DomainResult<()> {
        let text = serde_json::to_string(value)
            .map_err(|e| DomainError::Storage(format!("Failed to encode {}: {}", namespace, e)))?;
        self.backend.write(namespace, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::DEFAULT_CATEGORY_ID;
    use crate::domain::error::ErrorKind;
    use crate::infrastructure::repositories::memory_store::MemoryKeyValueStore;

    fn store() -> (Arc<MemoryKeyValueStore>, StateStore) {
        let backend = Arc::new(MemoryKeyValueStore::new());
        (backend.clone(), StateStore::new(backend))
    }

    fn bookmark(id: &str) -> Bookmark {
        Bookmark {
            id: id.to_string(),
            title: id.to_string(),
            url: format!("https://{}.example/", id),
            favicon: String::new(),
            category: None,
            created_at: 1,
            source: BookmarkSource::Manual,
        }
    }

    #[test]
    fn given_empty_store_when_read_then_defaults() {
        let (_, store) = store();
        assert!(store.manual_bookmarks().unwrap().is_empty());
        assert!(store.server_bookmarks().unwrap().is_empty());
        assert_eq!(store.categories().unwrap().len(), 3);
        assert_eq!(store.settings().unwrap().default_category, DEFAULT_CATEGORY_ID);
    }

    #[test]
    fn given_empty_store_when_initialize_then_all_namespaces_written() {
        let (backend, store) = store();
        store.initialize().unwrap();
        for namespace in Namespace::ALL {
            assert!(backend.read(namespace).unwrap().is_some(), "{} missing", namespace);
        }
        assert_eq!(backend.read(Namespace::ManualBookmarks).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn given_existing_data_when_initialize_then_left_untouched() {
        let (backend, store) = store();
        store.set_categories(&[]).unwrap();
        store.initialize().unwrap();
        assert_eq!(backend.read(Namespace::Categories).unwrap().as_deref(), Some("[]"));
        assert!(store.categories().unwrap().is_empty());
    }

    #[test]
    fn given_garbage_payload_when_read_then_corrupt_state() {
        let (backend, store) = store();
        backend.write(Namespace::Settings, "{not json").unwrap();
        let err = store.settings().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptState);
        assert!(matches!(
            err,
            DomainError::CorruptState { namespace: Namespace::Settings, .. }
        ));
    }

    #[test]
    fn given_partitions_when_read_then_tagged_by_partition() {
        let (_, store) = store();
        store.set_manual_bookmarks(&[bookmark("a")]).unwrap();
        store
            .set_server_bookmarks(&[bookmark("b").with_source(BookmarkSource::Server)])
            .unwrap();

        assert_eq!(store.manual_bookmarks().unwrap()[0].source, BookmarkSource::Manual);
        assert_eq!(store.server_bookmarks().unwrap()[0].source, BookmarkSource::Server);
    }
}

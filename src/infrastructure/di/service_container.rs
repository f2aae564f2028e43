// src/infrastructure/di/service_container.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::backup_service::BackupService;
use crate::application::services::bookmark_service::BookmarkService;
use crate::application::services::category_service::CategoryService;
use crate::application::services::settings_service::SettingsService;
use crate::application::services::sync_service::SyncService;
use crate::application::{
    BackupServiceImpl, BookmarkServiceImpl, CategoryServiceImpl, SettingsServiceImpl,
    SyncServiceImpl,
};
use crate::config::Settings;
use crate::domain::repositories::remote::RemoteBookmarkSource;
use crate::domain::repositories::store::{KeyValueStore, StateStore};
use crate::infrastructure::http::HttpBookmarkSource;
use crate::infrastructure::repositories::sqlite::kv_store::SqliteKeyValueStore;
use std::sync::Arc;
use tracing::debug;

/// Production service container - single source of truth for service creation
pub struct ServiceContainer {
    pub store: StateStore,

    // Application services
    pub bookmark_service: Arc<dyn BookmarkService>,
    pub sync_service: Arc<dyn SyncService>,
    pub category_service: Arc<dyn CategoryService>,
    pub settings_service: Arc<dyn SettingsService>,
    pub backup_service: Arc<dyn BackupService>,
}

impl ServiceContainer {
    /// Open the configured store and wire all services against it
    pub fn new(config: &Settings) -> ApplicationResult<Self> {
        let backend = SqliteKeyValueStore::from_path(&config.store_path).map_err(|e| {
            ApplicationError::Other(format!(
                "Failed to open store at {}: {}",
                config.store_path, e
            ))
        })?;
        let remote = HttpBookmarkSource::new(config.fetch_timeout());

        Self::with_parts(Arc::new(backend), Arc::new(remote))
    }

    /// Wire services over an arbitrary backend and remote source.
    ///
    /// Namespaces that were never written are seeded with defaults.
    pub fn with_parts(
        backend: Arc<dyn KeyValueStore>,
        remote: Arc<dyn RemoteBookmarkSource>,
    ) -> ApplicationResult<Self> {
        debug!("Wiring services over {:?}", backend);
        let store = StateStore::new(backend);
        store.initialize()?;

        let sync_service: Arc<dyn SyncService> =
            Arc::new(SyncServiceImpl::new(store.clone(), remote));
        let bookmark_service = Arc::new(BookmarkServiceImpl::new(
            store.clone(),
            sync_service.clone(),
        ));

        Ok(Self {
            bookmark_service,
            sync_service,
            category_service: Arc::new(CategoryServiceImpl::new(store.clone())),
            settings_service: Arc::new(SettingsServiceImpl::new(store.clone())),
            backup_service: Arc::new(BackupServiceImpl::new(store.clone())),
            store,
        })
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("store", &self.store)
            .field("bookmark_service", &"Arc<dyn BookmarkService>")
            .field("sync_service", &"Arc<dyn SyncService>")
            .field("category_service", &"Arc<dyn CategoryService>")
            .field("settings_service", &"Arc<dyn SettingsService>")
            .field("backup_service", &"Arc<dyn BackupService>")
            .finish()
    }
}

// src/application/services/settings_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::category::contains_category;
use crate::domain::error::DomainError;
use crate::domain::repositories::store::StateStore;
use crate::domain::settings::AppSettings;
use std::fmt::Debug;
use tracing::{debug, instrument};

/// Service interface for the persisted display and source preferences
pub trait SettingsService: Send + Sync + Debug {
    fn get(&self) -> ApplicationResult<AppSettings>;

    /// Persist settings after checking that the default category exists
    fn save(&self, settings: AppSettings) -> ApplicationResult<AppSettings>;

    /// Switch the grid between four and three columns
    fn toggle_grid(&self) -> ApplicationResult<AppSettings>;
}

#[derive(Debug)]
pub struct SettingsServiceImpl {
    store: StateStore,
}

impl SettingsServiceImpl {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }
}

impl SettingsService for SettingsServiceImpl {
    fn get(&self) -> ApplicationResult<AppSettings> {
        Ok(self.store.settings()?)
    }

    #[instrument(skip(self), level = "debug")]
    fn save(&self, settings: AppSettings) -> ApplicationResult<AppSettings> {
        let categories = self.store.categories()?;
        if !contains_category(&categories, &settings.default_category) {
            return Err(DomainError::CategoryNotFound(settings.default_category).into());
        }
        self.store.set_settings(&settings)?;
        Ok(settings)
    }

    #[instrument(skip(self), level = "debug")]
    fn toggle_grid(&self) -> ApplicationResult<AppSettings> {
        let mut settings = self.store.settings()?;
        settings.grid_cols = settings.grid_cols.toggled();
        debug!("Grid now {} columns", settings.grid_cols.columns());
        self.store.set_settings(&settings)?;
        Ok(settings)
    }
}

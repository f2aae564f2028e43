// src/application/services/category_service.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::bookmark::now_millis;
use crate::domain::category::BookmarkCategory;
use crate::domain::error::DomainError;
use crate::domain::repositories::store::StateStore;
use std::fmt::Debug;
use tracing::{debug, instrument};

/// Service interface for the user-editable category list
pub trait CategoryService: Send + Sync + Debug {
    fn list(&self) -> ApplicationResult<Vec<BookmarkCategory>>;

    /// Append a new category with a generated id
    fn add(&self, name: &str, color: Option<&str>) -> ApplicationResult<BookmarkCategory>;

    /// Replace name and color of an existing category
    fn update(&self, category: BookmarkCategory) -> ApplicationResult<BookmarkCategory>;

    /// Remove a category; the configured default category cannot be removed
    fn delete(&self, id: &str) -> ApplicationResult<()>;
}

#[derive(Debug)]
pub struct CategoryServiceImpl {
    store: StateStore,
}

impl CategoryServiceImpl {
    pub fn new(store: StateStore) -> Self {
        debug!("Creating new CategoryServiceImpl");
        Self { store }
    }

    fn require_name(name: &str) -> ApplicationResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApplicationError::Validation(
                "Category name must not be empty".to_string(),
            ));
        }
        Ok(name.to_string())
    }
}

impl CategoryService for CategoryServiceImpl {
    fn list(&self) -> ApplicationResult<Vec<BookmarkCategory>> {
        Ok(self.store.categories()?)
    }

    #[instrument(skip(self), level = "debug")]
    fn add(&self, name: &str, color: Option<&str>) -> ApplicationResult<BookmarkCategory> {
        let name = Self::require_name(name)?;
        let mut categories = self.store.categories()?;

        let mut id = format!("cat_{}", now_millis());
        // two adds within the same millisecond
        while categories.iter().any(|c| c.id == id) {
            id.push('_');
        }

        let category = BookmarkCategory::new(id, name, color.filter(|c| !c.trim().is_empty()));
        categories.push(category.clone());
        self.store.set_categories(&categories)?;
        Ok(category)
    }

    #[instrument(skip(self), level = "debug", fields(id = %category.id))]
    fn update(&self, category: BookmarkCategory) -> ApplicationResult<BookmarkCategory> {
        let name = Self::require_name(&category.name)?;
        let mut categories = self.store.categories()?;

        let existing = categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| DomainError::CategoryNotFound(category.id.clone()))?;
        existing.name = name;
        existing.color = category.color.filter(|c| !c.trim().is_empty());
        let updated = existing.clone();

        self.store.set_categories(&categories)?;
        Ok(updated)
    }

    #[instrument(skip(self), level = "debug")]
    fn delete(&self, id: &str) -> ApplicationResult<()> {
        let settings = self.store.settings()?;
        if settings.default_category == id {
            return Err(DomainError::CategoryInUse(id.to_string()).into());
        }

        let mut categories = self.store.categories()?;
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            debug!("Category {} does not exist, nothing to delete", id);
            return Ok(());
        }

        self.store.set_categories(&categories)?;
        Ok(())
    }
}

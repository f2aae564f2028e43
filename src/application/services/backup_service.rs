// src/application/services/backup_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::bookmark::{Bookmark, BookmarkSource};
use crate::domain::category::contains_category;
use crate::domain::error::DomainError;
use crate::domain::favicon::validate_url;
use crate::domain::repositories::store::StateStore;
use crate::infrastructure::json::{parse_import_document, write_export_document, ExportDocument};
use chrono::Local;
use std::fmt::Debug;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

/// File name suggested for an export written today.
pub fn default_export_filename() -> String {
    format!(
        "oriby_bookmarks_export_{}.json",
        Local::now().format("%Y-%m-%d")
    )
}

/// Backup and restore of user-owned state
pub trait BackupService: Send + Sync + Debug {
    /// Serialize manual bookmarks, settings and categories
    fn export(&self) -> ApplicationResult<String>;

    /// Replace each partition present in `text`; nothing is written unless the whole document is valid
    fn import(&self, text: &str) -> ApplicationResult<()>;

    fn export_to_file(&self, path: &Path) -> ApplicationResult<()> {
        let document = self.export()?;
        fs::write(path, document)?;
        info!("Exported bookmarks to {}", path.display());
        Ok(())
    }

    fn import_from_file(&self, path: &Path) -> ApplicationResult<()> {
        let text = fs::read_to_string(path)?;
        self.import(&text)
            .map_err(|e| e.context(format!("Import from {}", path.display())))
    }
}

#[derive(Debug)]
pub struct BackupServiceImpl {
    store: StateStore,
}

impl BackupServiceImpl {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }

    /// Imported records obey the same URL rules as written ones.
    fn normalize_bookmark(bookmark: Bookmark) -> ApplicationResult<Bookmark> {
        let url = validate_url(&bookmark.url).map_err(|_| {
            DomainError::ImportFailed(format!(
                "Bookmark '{}' has an invalid URL '{}'",
                bookmark.id, bookmark.url
            ))
        })?;
        Ok(Bookmark {
            url,
            ..bookmark.with_source(BookmarkSource::Manual)
        })
    }
}

impl BackupService for BackupServiceImpl {
    #[instrument(skip(self), level = "debug")]
    fn export(&self) -> ApplicationResult<String> {
        let bookmarks = self.store.manual_bookmarks()?;
        let settings = self.store.settings()?;
        let categories = self.store.categories()?;
        debug!("Exporting {} bookmarks", bookmarks.len());

        Ok(write_export_document(&ExportDocument {
            bookmarks: &bookmarks,
            settings: &settings,
            categories: &categories,
        })?)
    }

    #[instrument(skip(self, text), level = "debug")]
    fn import(&self, text: &str) -> ApplicationResult<()> {
        let document = parse_import_document(text)?;

        let effective_settings = match &document.settings {
            Some(settings) => settings.clone(),
            None => self.store.settings()?,
        };
        let effective_categories = match &document.categories {
            Some(categories) => categories.clone(),
            None => self.store.categories()?,
        };
        if !contains_category(&effective_categories, &effective_settings.default_category) {
            return Err(DomainError::ImportFailed(format!(
                "Default category '{}' is not among the categories",
                effective_settings.default_category
            ))
            .into());
        }

        let bookmarks = document
            .bookmarks
            .map(|bookmarks| {
                bookmarks
                    .into_iter()
                    .map(Self::normalize_bookmark)
                    .collect::<ApplicationResult<Vec<_>>>()
            })
            .transpose()?;

        if let Some(bookmarks) = bookmarks {
            debug!("Importing {} bookmarks", bookmarks.len());
            self.store.set_manual_bookmarks(&bookmarks)?;
        }
        if let Some(categories) = document.categories {
            self.store.set_categories(&categories)?;
        }
        if let Some(settings) = document.settings {
            self.store.set_settings(&settings)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorKind;
    use crate::domain::repositories::store::Namespace;
    use crate::util::testing::{init_test_env, setup_test_store};
    use rstest::rstest;
    use serde_json::Value;
    use tempfile::tempdir;

    fn create_test_service() -> (StateStore, BackupServiceImpl) {
        let _ = init_test_env();
        let store = setup_test_store();
        (store.clone(), BackupServiceImpl::new(store))
    }

    fn bookmark(id: &str, source: BookmarkSource) -> Bookmark {
        Bookmark {
            id: id.to_string(),
            title: format!("Title {}", id),
            url: format!("https://{}.example/", id),
            favicon: String::new(),
            category: Some("default".to_string()),
            created_at: 42,
            source,
        }
    }

    fn snapshot(store: &StateStore) -> Vec<Option<String>> {
        Namespace::ALL
            .iter()
            .map(|ns| store.raw(*ns).unwrap())
            .collect()
    }

    #[test]
    fn given_both_partitions_when_export_then_only_manual_without_source() {
        let (store, service) = create_test_service();
        store
            .set_manual_bookmarks(&[bookmark("m1", BookmarkSource::Manual)])
            .unwrap();
        store
            .set_server_bookmarks(&[bookmark("s1", BookmarkSource::Server)])
            .unwrap();

        let exported: Value = serde_json::from_str(&service.export().unwrap()).unwrap();

        let bookmarks = exported["bookmarks"].as_array().unwrap();
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0]["id"], "m1");
        assert_eq!(bookmarks[0]["createdAt"], 42);
        assert!(bookmarks[0].get("source").is_none());
        assert_eq!(exported["settings"]["gridCols"], "grid-cols-4");
        assert_eq!(exported["categories"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn given_export_when_imported_into_fresh_store_then_state_restored() {
        let (store, service) = create_test_service();
        store
            .set_manual_bookmarks(&[bookmark("m1", BookmarkSource::Manual)])
            .unwrap();
        let exported = service.export().unwrap();

        let (fresh_store, fresh) = create_test_service();
        fresh.import(&exported).unwrap();

        assert_eq!(
            fresh_store.manual_bookmarks().unwrap(),
            store.manual_bookmarks().unwrap()
        );
        assert_eq!(fresh_store.settings().unwrap(), store.settings().unwrap());
        assert_eq!(fresh_store.categories().unwrap(), store.categories().unwrap());
    }

    #[test]
    fn given_partial_document_when_import_then_only_present_fields_replaced() {
        let (store, service) = create_test_service();
        let settings_before = store.raw(Namespace::Settings).unwrap();

        service
            .import(r#"{"bookmarks": [{"id": "x", "title": "X", "url": "https://x.example/", "favicon": "", "createdAt": 1, "source": "server"}]}"#)
            .unwrap();

        let manual = store.manual_bookmarks().unwrap();
        assert_eq!(manual.len(), 1);
        assert_eq!(manual[0].source, BookmarkSource::Manual);
        assert_eq!(store.raw(Namespace::Settings).unwrap(), settings_before);
    }

    #[rstest]
    #[case::not_json("this is not json")]
    #[case::array("[1, 2, 3]")]
    #[case::wrong_type(r#"{"bookmarks": "nope"}"#)]
    #[case::unresolved_default(r#"{"settings": {"gridCols": "grid-cols-3", "showTitles": true, "defaultCategory": "ghost"}}"#)]
    #[case::default_removed_by_categories(r#"{"categories": [{"id": "work", "name": "Work"}]}"#)]
    #[case::invalid_bookmark_url(r#"{"bookmarks": [{"id": "x", "title": "t", "url": "not a url", "favicon": "", "createdAt": 1}]}"#)]
    #[case::invalid_url_after_valid(r#"{"bookmarks": [{"id": "ok", "title": "Ok", "url": "https://ok.example/", "createdAt": 1}, {"id": "bad", "title": "Bad", "url": "", "createdAt": 2}], "settings": {"gridCols": "grid-cols-3", "showTitles": true, "defaultCategory": "default"}}"#)]
    fn given_invalid_document_when_import_then_import_failed_and_nothing_written(
        #[case] text: &str,
    ) {
        let (store, service) = create_test_service();
        store
            .set_manual_bookmarks(&[bookmark("keep", BookmarkSource::Manual)])
            .unwrap();
        let before = snapshot(&store);

        let err = service.import(text).unwrap_err();

        assert!(err.is_kind(ErrorKind::ImportFailed), "got {:?}", err);
        assert_eq!(snapshot(&store), before);
    }

    #[test]
    fn given_scheme_less_url_when_import_then_stored_normalized() {
        let (store, service) = create_test_service();

        service
            .import(r#"{"bookmarks": [{"id": "n", "title": "N", "url": "Example.com/path", "favicon": "", "createdAt": 1}]}"#)
            .unwrap();

        assert_eq!(
            store.manual_bookmarks().unwrap()[0].url,
            "https://example.com/path"
        );
    }

    #[test]
    fn given_paths_when_export_and_import_files_then_round_trips() {
        let (store, service) = create_test_service();
        store
            .set_manual_bookmarks(&[bookmark("file", BookmarkSource::Manual)])
            .unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join(default_export_filename());

        service.export_to_file(&path).unwrap();
        let (fresh_store, fresh) = create_test_service();
        fresh.import_from_file(&path).unwrap();

        assert_eq!(fresh_store.manual_bookmarks().unwrap()[0].id, "file");
    }

    #[test]
    fn given_missing_file_when_import_from_file_then_io_error() {
        let (_, service) = create_test_service();
        let err = service
            .import_from_file(Path::new("/nonexistent/oriby/backup.json"))
            .unwrap_err();
        assert!(err.is_kind(ErrorKind::Storage));
    }

    #[test]
    fn given_today_when_default_export_filename_then_dated() {
        let name = default_export_filename();
        assert!(name.starts_with("oriby_bookmarks_export_"));
        assert!(name.ends_with(".json"));
        assert_eq!(name.len(), "oriby_bookmarks_export_2024-01-01.json".len());
    }
}

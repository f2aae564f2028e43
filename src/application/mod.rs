// src/application/mod.rs
pub mod error;
pub mod services;

// Re-export key services for easier imports
pub use services::backup_service::BackupServiceImpl;
pub use services::bookmark_service_impl::BookmarkServiceImpl;
pub use services::category_service::CategoryServiceImpl;
pub use services::settings_service::SettingsServiceImpl;
pub use services::sync_service::SyncServiceImpl;

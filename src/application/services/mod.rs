// src/application/services/mod.rs
pub mod backup_service;
pub mod bookmark_service;
pub mod bookmark_service_impl;
pub mod category_service;
pub mod settings_service;
pub mod sync_service;

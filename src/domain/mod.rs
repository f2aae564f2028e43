// src/domain/mod.rs
pub mod bookmark;
pub mod category;
pub mod error;
pub mod favicon;
pub mod repositories;
pub mod search;
pub mod settings;

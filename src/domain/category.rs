// src/domain/category.rs
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_CATEGORY_ID: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkCategory {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl BookmarkCategory {
    pub fn new<S: Into<String>>(id: S, name: S, color: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.map(str::to_string),
        }
    }
}

impl fmt::Display for BookmarkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.color {
            Some(color) => write!(f, "{}: {} ({})", self.id, self.name, color),
            None => write!(f, "{}: {}", self.id, self.name),
        }
    }
}

/// Seed categories for a fresh store.
pub fn default_categories() -> Vec<BookmarkCategory> {
    vec![
        BookmarkCategory::new(DEFAULT_CATEGORY_ID, "General", Some("#9b87f5")),
        BookmarkCategory::new("social", "Social Media", Some("#7E69AB")),
        BookmarkCategory::new("work", "Work", Some("#6E59A5")),
    ]
}

pub fn contains_category(categories: &[BookmarkCategory], id: &str) -> bool {
    categories.iter().any(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_listed_then_three_seed_categories() {
        let categories = default_categories();
        let ids: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["default", "social", "work"]);
        assert!(contains_category(&categories, DEFAULT_CATEGORY_ID));
        assert!(!contains_category(&categories, "missing"));
    }

    #[test]
    fn given_category_without_color_when_serialized_then_color_omitted() {
        let json = serde_json::to_string(&BookmarkCategory::new("x", "X", None)).unwrap();
        assert_eq!(json, r#"{"id":"x","name":"X"}"#);
    }
}

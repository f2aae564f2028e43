// src/domain/search.rs
use crate::domain::bookmark::Bookmark;

/// Narrowing applied on top of a merged read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkFilter {
    /// Substring of title or URL, case-insensitive
    pub term: Option<String>,
    /// Exact category id
    pub category: Option<String>,
}

impl BookmarkFilter {
    pub fn new(term: Option<String>, category: Option<String>) -> Self {
        Self {
            term: term.filter(|t| !t.trim().is_empty()),
            category: category.filter(|c| !c.is_empty() && c != "all"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_none() && self.category.is_none()
    }

    pub fn matches(&self, bookmark: &Bookmark) -> bool {
        let term_ok = self
            .term
            .as_deref()
            .map_or(true, |term| bookmark.matches_term(term.trim()));
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |category| bookmark.in_category(category));
        term_ok && category_ok
    }

    /// Keep matching bookmarks, preserving order.
    pub fn apply(&self, bookmarks: Vec<Bookmark>) -> Vec<Bookmark> {
        if self.is_empty() {
            return bookmarks;
        }
        bookmarks.into_iter().filter(|b| self.matches(b)).collect()
    }
}

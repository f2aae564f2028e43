// src/domain/bookmark.rs
use chrono::Utc;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Provenance of a bookmark: owned locally or mirrored from the remote document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkSource {
    #[default]
    Manual,
    Server,
}

impl BookmarkSource {
    pub fn is_read_only(&self) -> bool {
        matches!(self, BookmarkSource::Server)
    }

    /// Prefix for synthesized ids, keeps generated ids of both partitions apart.
    fn id_prefix(&self) -> &'static str {
        match self {
            BookmarkSource::Manual => "bm",
            BookmarkSource::Server => "srv",
        }
    }
}

impl fmt::Display for BookmarkSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkSource::Manual => write!(f, "manual"),
            BookmarkSource::Server => write!(f, "server"),
        }
    }
}

/// A bookmark as held in one of the two partitions.
///
/// `source` is never persisted: it is assigned from the partition a record
/// was read from, so a stored or imported record cannot claim another origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub favicon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: i64,
    #[serde(default, skip_serializing)]
    pub source: BookmarkSource,
}

impl Bookmark {
    /// Re-tag the record with the partition it belongs to.
    pub fn with_source(mut self, source: BookmarkSource) -> Self {
        self.source = source;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.source.is_read_only()
    }

    /// Case-insensitive substring match on title or URL.
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.url.to_lowercase().contains(&term)
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} <{}> [{}]", self.id, self.title, self.url, self.source)
    }
}

/// Caller-supplied fields for a create-or-update; everything but the URL may be left out.
#[derive(Builder, Debug, Clone, Default, PartialEq)]
#[builder(setter(into, strip_option), default)]
pub struct BookmarkDraft {
    pub id: Option<String>,
    pub title: String,
    pub url: String,
    pub favicon: Option<String>,
    pub category: Option<String>,
    pub created_at: Option<i64>,
    /// Ignored by the write path, which always stamps `manual`.
    pub source: Option<BookmarkSource>,
}

impl BookmarkDraft {
    pub fn new<S: Into<String>>(title: S, url: S) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    /// Start an edit from an existing record.
    pub fn from_bookmark(bookmark: &Bookmark) -> Self {
        Self {
            id: Some(bookmark.id.clone()),
            title: bookmark.title.clone(),
            url: bookmark.url.clone(),
            favicon: Some(bookmark.favicon.clone()),
            category: bookmark.category.clone(),
            created_at: Some(bookmark.created_at),
            source: Some(bookmark.source),
        }
    }
}

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Unique id derived from the current time and a random component.
pub fn generate_id(source: BookmarkSource) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", source.id_prefix(), now_millis(), &random[..8])
}

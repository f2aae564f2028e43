// src/infrastructure/json.rs
//! Wire formats: the backup document and the remote bookmark document.

use crate::domain::bookmark::Bookmark;
use crate::domain::category::BookmarkCategory;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::settings::AppSettings;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Full backup of user-owned state. The server cache is never part of it.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub bookmarks: &'a [Bookmark],
    pub settings: &'a AppSettings,
    pub categories: &'a [BookmarkCategory],
}

/// Parsed backup; a field is `None` when absent (or null) in the input.
#[derive(Debug, Default, Deserialize)]
pub struct ImportDocument {
    pub bookmarks: Option<Vec<Bookmark>>,
    pub settings: Option<AppSettings>,
    pub categories: Option<Vec<BookmarkCategory>>,
}

pub fn write_export_document(document: &ExportDocument<'_>) -> DomainResult<String> {
    serde_json::to_string_pretty(document)
        .map_err(|e| DomainError::Other(format!("Failed to serialize export: {}", e)))
}

/// Parse a backup document completely before anything is applied.
pub fn parse_import_document(text: &str) -> DomainResult<ImportDocument> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| DomainError::ImportFailed(format!("Invalid JSON: {}", e)))?;

    if !value.is_object() {
        return Err(DomainError::ImportFailed(
            "Expected a JSON object with bookmarks, settings and categories".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| DomainError::ImportFailed(format!("Invalid document structure: {}", e)))
}

/// One entry of the remote document before normalization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBookmark {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: String,
    pub favicon: Option<String>,
    pub category: Option<String>,
    pub created_at: Option<i64>,
}

/// Accepts a JSON array of entries, or an object holding one under `bookmarks`.
///
/// Entries that do not have the bookmark shape are skipped; a payload that is
/// not JSON or holds no array fails as a whole.
pub fn parse_remote_document(body: &str) -> DomainResult<Vec<RemoteBookmark>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| DomainError::FetchFailed(format!("Response is not valid JSON: {}", e)))?;

    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("bookmarks") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(DomainError::FetchFailed(
                    "Response object has no 'bookmarks' array".to_string(),
                ))
            }
        },
        other => {
            return Err(DomainError::FetchFailed(format!(
                "Expected a JSON array of bookmarks, got {}",
                json_type_name(&other)
            )))
        }
    };

    let total = entries.len();
    let parsed: Vec<RemoteBookmark> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value::<RemoteBookmark>(entry) {
            Ok(bookmark) => Some(bookmark),
            Err(e) => {
                warn!("Skipping remote bookmark #{}: {}", i, e);
                None
            }
        })
        .collect();
    debug!("Parsed {} of {} remote entries", parsed.len(), total);
    Ok(parsed)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

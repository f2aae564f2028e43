// src/domain/settings.rs
use crate::domain::bookmark::BookmarkSource;
use crate::domain::category::DEFAULT_CATEGORY_ID;
use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SERVER_BOOKMARKS_URL: &str = "https://example.com/oriby/bookmarks.json";

/// Number of columns in the bookmark grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridCols {
    #[serde(rename = "grid-cols-2")]
    Two,
    #[serde(rename = "grid-cols-3")]
    Three,
    #[default]
    #[serde(rename = "grid-cols-4")]
    Four,
    #[serde(rename = "grid-cols-5")]
    Five,
    #[serde(rename = "grid-cols-6")]
    Six,
}

impl GridCols {
    pub fn columns(&self) -> u8 {
        match self {
            GridCols::Two => 2,
            GridCols::Three => 3,
            GridCols::Four => 4,
            GridCols::Five => 5,
            GridCols::Six => 6,
        }
    }

    pub fn from_columns(columns: u8) -> Option<Self> {
        match columns {
            2 => Some(GridCols::Two),
            3 => Some(GridCols::Three),
            4 => Some(GridCols::Four),
            5 => Some(GridCols::Five),
            6 => Some(GridCols::Six),
            _ => None,
        }
    }

    /// Switch between the compact and the wide layout.
    pub fn toggled(&self) -> Self {
        match self {
            GridCols::Four => GridCols::Three,
            _ => GridCols::Four,
        }
    }
}

/// Which partitions a read combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFilter {
    Server,
    Manual,
    #[default]
    Both,
}

impl SourceFilter {
    pub fn includes(&self, source: BookmarkSource) -> bool {
        match self {
            SourceFilter::Both => true,
            SourceFilter::Manual => source == BookmarkSource::Manual,
            SourceFilter::Server => source == BookmarkSource::Server,
        }
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFilter::Server => write!(f, "server"),
            SourceFilter::Manual => write!(f, "manual"),
            SourceFilter::Both => write!(f, "both"),
        }
    }
}

impl FromStr for SourceFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "server" => Ok(SourceFilter::Server),
            "manual" => Ok(SourceFilter::Manual),
            "both" => Ok(SourceFilter::Both),
            other => Err(DomainError::Other(format!(
                "Unknown bookmark source '{}', expected server, manual or both",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub grid_cols: GridCols,
    pub show_titles: bool,
    pub default_category: String,
    #[serde(default)]
    pub bookmark_source: SourceFilter,
    #[serde(default = "default_server_bookmarks_url")]
    pub server_bookmarks_url: String,
}

fn default_server_bookmarks_url() -> String {
    DEFAULT_SERVER_BOOKMARKS_URL.to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            grid_cols: GridCols::default(),
            show_titles: true,
            default_category: DEFAULT_CATEGORY_ID.to_string(),
            bookmark_source: SourceFilter::default(),
            server_bookmarks_url: default_server_bookmarks_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_serialized_then_uses_wire_names() {
        let json = serde_json::to_value(AppSettings::default()).unwrap();
        assert_eq!(json["gridCols"], "grid-cols-4");
        assert_eq!(json["showTitles"], true);
        assert_eq!(json["defaultCategory"], "default");
        assert_eq!(json["bookmarkSource"], "both");
        assert_eq!(json["serverBookmarksUrl"], DEFAULT_SERVER_BOOKMARKS_URL);
    }

    #[test]
    fn given_legacy_settings_without_source_when_deserialized_then_defaults_fill_in() {
        let json = r#"{"gridCols":"grid-cols-3","showTitles":false,"defaultCategory":"work"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.grid_cols, GridCols::Three);
        assert_eq!(settings.bookmark_source, SourceFilter::Both);
        assert_eq!(settings.server_bookmarks_url, DEFAULT_SERVER_BOOKMARKS_URL);
    }

    #[test]
    fn given_grid_when_toggled_then_alternates_between_four_and_three() {
        assert_eq!(GridCols::Four.toggled(), GridCols::Three);
        assert_eq!(GridCols::Three.toggled(), GridCols::Four);
        assert_eq!(GridCols::Six.toggled(), GridCols::Four);
        assert_eq!(GridCols::from_columns(7), None);
        assert_eq!(GridCols::from_columns(5).map(|g| g.columns()), Some(5));
    }

    #[test]
    fn given_filter_strings_when_parsed_then_maps_variants() {
        assert_eq!("Manual".parse::<SourceFilter>().unwrap(), SourceFilter::Manual);
        assert_eq!(" both ".parse::<SourceFilter>().unwrap(), SourceFilter::Both);
        assert!("everything".parse::<SourceFilter>().is_err());
        assert!(SourceFilter::Both.includes(BookmarkSource::Server));
        assert!(!SourceFilter::Manual.includes(BookmarkSource::Server));
    }
}

// src/cli/display.rs

use crate::domain::bookmark::Bookmark;
use crate::domain::category::BookmarkCategory;
use crate::domain::settings::AppSettings;
use chrono::{Local, TimeZone};
use crossterm::style::Stylize;
use itertools::Itertools;
use std::fmt::Write;

/// Flattened view of a bookmark for terminal output.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayBookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: String,
    pub created: String,
    pub read_only: bool,
}

impl DisplayBookmark {
    pub fn from_domain(bookmark: &Bookmark, categories: &[BookmarkCategory]) -> Self {
        let category = bookmark
            .category
            .as_deref()
            .map(|id| {
                categories
                    .iter()
                    .find(|c| c.id == id)
                    .map_or_else(|| id.to_string(), |c| c.name.clone())
            })
            .unwrap_or_default();

        Self {
            id: bookmark.id.clone(),
            title: bookmark.title.clone(),
            url: bookmark.url.clone(),
            category,
            created: format_timestamp(bookmark.created_at),
            read_only: bookmark.is_read_only(),
        }
    }
}

fn format_timestamp(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Render bookmarks as a numbered list. Server bookmarks carry a lock marker.
pub fn render_bookmarks(bookmarks: &[Bookmark], categories: &[BookmarkCategory]) -> String {
    let mut output = String::new();
    let first_col_width = bookmarks.len().to_string().len();

    for (i, bm) in bookmarks
        .iter()
        .map(|b| DisplayBookmark::from_domain(b, categories))
        .enumerate()
    {
        let marker = if bm.read_only { " [server]" } else { "" };
        let _ = writeln!(
            output,
            "{:first_col_width$}. {}{} [{}]",
            i + 1,
            bm.title.as_str().green(),
            marker.dark_grey(),
            bm.id.as_str().white()
        );
        let _ = writeln!(
            output,
            "{:first_col_width$}  {}",
            "",
            bm.url.as_str().yellow()
        );
        let details = [bm.category.as_str(), bm.created.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .join(", ");
        if !details.is_empty() {
            let _ = writeln!(output, "{:first_col_width$}  {}", "", details.as_str().cyan());
        }
        output.push('\n');
    }
    output
}

pub fn show_bookmarks(bookmarks: &[Bookmark], categories: &[BookmarkCategory]) {
    if bookmarks.is_empty() {
        eprintln!("No bookmarks to display");
        return;
    }
    eprint!("{}", render_bookmarks(bookmarks, categories));
}

pub fn render_categories(categories: &[BookmarkCategory], default_category: &str) -> String {
    let mut output = String::new();
    for category in categories {
        let marker = if category.id == default_category {
            " (default)"
        } else {
            ""
        };
        let _ = writeln!(
            output,
            "  {} {}{} {}",
            category.id.as_str().white(),
            category.name.as_str().green(),
            marker,
            category.color.as_deref().unwrap_or("").dark_grey()
        );
    }
    output
}

pub fn render_settings(settings: &AppSettings) -> String {
    [
        ("grid columns", settings.grid_cols.columns().to_string()),
        ("show titles", settings.show_titles.to_string()),
        ("default category", settings.default_category.clone()),
        ("bookmark source", settings.bookmark_source.to_string()),
        ("server url", settings.server_bookmarks_url.clone()),
    ]
    .iter()
    .map(|(label, value)| format!("{:>16}: {}", label, value.as_str().green()))
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bookmark::BookmarkSource;
    use crate::domain::category::default_categories;

    fn bookmark(source: BookmarkSource) -> Bookmark {
        Bookmark {
            id: "bm_1".to_string(),
            title: "Rust".to_string(),
            url: "https://www.rust-lang.org/".to_string(),
            favicon: String::new(),
            category: Some("work".to_string()),
            created_at: 1_700_000_000_000,
            source,
        }
    }

    #[test]
    fn given_bookmark_with_known_category_when_from_domain_then_uses_category_name() {
        let display = DisplayBookmark::from_domain(&bookmark(BookmarkSource::Manual), &default_categories());
        assert_eq!(display.category, "Work");
        assert!(!display.read_only);
        assert_eq!(display.created.len(), "2023-11-14".len());
    }

    #[test]
    fn given_server_bookmark_when_rendered_then_marked() {
        crossterm::style::force_color_output(false);
        let output = render_bookmarks(&[bookmark(BookmarkSource::Server)], &default_categories());
        assert!(output.contains("Rust"));
        assert!(output.contains("[server]"));
        assert!(output.contains("https://www.rust-lang.org/"));
    }

    #[test]
    fn given_default_settings_when_rendered_then_lists_all_fields() {
        crossterm::style::force_color_output(false);
        let output = render_settings(&AppSettings::default());
        assert!(output.contains("grid columns: 4"));
        assert!(output.contains("bookmark source: both"));
    }
}

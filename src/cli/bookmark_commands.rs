// src/cli/bookmark_commands.rs
use crate::application::error::ApplicationError;
use crate::application::services::backup_service::default_export_filename;
use crate::cli::display::show_bookmarks;
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::bookmark::{Bookmark, BookmarkDraft, BookmarkSource};
use crate::domain::favicon::format_url;
use crate::domain::search::BookmarkFilter;
use crate::domain::settings::SourceFilter;
use crate::infrastructure::di::ServiceContainer;
use crossterm::style::Stylize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

fn print_json(bookmarks: &[Bookmark]) -> CliResult<()> {
    let mut entries = Vec::with_capacity(bookmarks.len());
    for bookmark in bookmarks {
        let mut value = serde_json::to_value(bookmark)?;
        if let Value::Object(map) = &mut value {
            map.insert("source".to_string(), serde_json::to_value(bookmark.source)?);
        }
        entries.push(value);
    }
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

fn warn_stale(err: &ApplicationError) {
    eprintln!(
        "{} {}",
        "Server bookmarks could not be refreshed, showing cached list:".yellow(),
        err
    );
}

#[instrument(skip(services))]
pub fn list(
    services: &ServiceContainer,
    query: Option<String>,
    source: Option<String>,
    category: Option<String>,
    is_json: bool,
) -> CliResult<()> {
    let filter = BookmarkFilter::new(query, category);

    let bookmarks = match source {
        None => {
            let loaded = services.bookmark_service.load()?;
            if let Some(err) = &loaded.fetch_error {
                warn_stale(err);
            }
            filter.apply(loaded.bookmarks)
        }
        Some(source) => {
            let source: SourceFilter = source
                .parse()
                .map_err(|e| CliError::InvalidInput(format!("{}", e)))?;
            if source.includes(BookmarkSource::Server) {
                let url = services.settings_service.get()?.server_bookmarks_url;
                if let Err(err) = services.sync_service.refresh(&url) {
                    warn_stale(&err);
                }
            }
            services.bookmark_service.search(source, &filter)?
        }
    };
    debug!("Listing {} bookmarks", bookmarks.len());

    if is_json {
        return print_json(&bookmarks);
    }
    let categories = services.category_service.list()?;
    show_bookmarks(&bookmarks, &categories);
    Ok(())
}

#[instrument(skip(services))]
pub fn add(
    services: &ServiceContainer,
    url: String,
    title: Option<String>,
    category: Option<String>,
    favicon: Option<String>,
) -> CliResult<()> {
    let draft = BookmarkDraft {
        title: title.unwrap_or_default(),
        url,
        category,
        favicon,
        ..Default::default()
    };

    let bookmark = services.bookmark_service.write(draft)?;
    eprintln!("Added: {} ({})", bookmark.title.as_str().green(), bookmark.url);
    println!("{}", bookmark.id);
    Ok(())
}

#[instrument(skip(services))]
pub fn edit(
    services: &ServiceContainer,
    id: String,
    title: Option<String>,
    url: Option<String>,
    category: Option<String>,
    favicon: Option<String>,
) -> CliResult<()> {
    let existing = services
        .bookmark_service
        .get(&id)?
        .ok_or_else(|| ApplicationError::BookmarkNotFound(id.clone()))?;

    let mut draft = BookmarkDraft::from_bookmark(&existing);
    if let Some(title) = title {
        draft.title = title;
    }
    if let Some(url) = url {
        draft.url = url;
        // icon follows the new host unless given explicitly
        draft.favicon = None;
    }
    if let Some(category) = category {
        draft.category = Some(category);
    }
    if favicon.is_some() {
        draft.favicon = favicon;
    }

    let bookmark = services.bookmark_service.write(draft)?;
    eprintln!("Updated: {} ({})", bookmark.title.as_str().green(), bookmark.url);
    Ok(())
}

#[instrument(skip(services))]
pub fn delete(services: &ServiceContainer, id: String) -> CliResult<()> {
    if services.bookmark_service.remove(&id)? {
        eprintln!("Deleted bookmark with ID {}", id);
    } else {
        eprintln!("Bookmark with ID {} not found", id);
    }
    Ok(())
}

#[instrument(skip(services))]
pub fn refresh(services: &ServiceContainer) -> CliResult<()> {
    let url = services.settings_service.get()?.server_bookmarks_url;
    let bookmarks = services.sync_service.refresh(&url)?;
    eprintln!(
        "Fetched {} server bookmarks from {}",
        bookmarks.len().to_string().green(),
        url
    );
    Ok(())
}

#[instrument(skip(services))]
pub fn export(services: &ServiceContainer, file: Option<PathBuf>) -> CliResult<()> {
    match file {
        Some(path) if path == Path::new("-") => {
            println!("{}", services.backup_service.export()?);
        }
        Some(path) => {
            services.backup_service.export_to_file(&path)?;
            eprintln!("Exported to {}", path.display());
        }
        None => {
            let path = PathBuf::from(default_export_filename());
            services.backup_service.export_to_file(&path)?;
            eprintln!("Exported to {}", path.display());
        }
    }
    Ok(())
}

#[instrument(skip(services))]
pub fn import(services: &ServiceContainer, file: PathBuf) -> CliResult<()> {
    services.backup_service.import_from_file(&file)?;
    eprintln!("Imported {}", file.display());
    Ok(())
}

pub fn init(services: &ServiceContainer, settings: &Settings) -> CliResult<()> {
    services.store.initialize()?;
    eprintln!("Store ready at {}", settings.store_path.as_str().green());
    Ok(())
}

pub fn format_url_command(url: String) -> CliResult<()> {
    let formatted = format_url(&url);
    if formatted.is_empty() {
        return Err(CliError::InvalidInput(format!("'{}' is not a valid URL", url)));
    }
    println!("{}", formatted);
    Ok(())
}

// src/cli/mod.rs
use crate::application::error::ApplicationError;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::error::ErrorKind;
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;

pub mod args;
pub mod bookmark_commands;
pub mod category_commands;
pub mod display;
pub mod error;
pub mod settings_commands;

pub fn execute_command_with_services(
    cli: Cli,
    services: &ServiceContainer,
    settings: &Settings,
) -> CliResult<()> {
    match cli.command {
        Some(Commands::List {
            query,
            source,
            category,
            is_json,
        }) => bookmark_commands::list(services, query, source, category, is_json),
        Some(Commands::Add {
            url,
            title,
            category,
            favicon,
        }) => bookmark_commands::add(services, url, title, category, favicon),
        Some(Commands::Edit {
            id,
            title,
            url,
            category,
            favicon,
        }) => bookmark_commands::edit(services, id, title, url, category, favicon),
        Some(Commands::Delete { id }) => bookmark_commands::delete(services, id),
        Some(Commands::Refresh) => bookmark_commands::refresh(services),
        Some(Commands::Category { action }) => category_commands::handle(services, action),
        Some(Commands::Settings { action }) => settings_commands::handle(services, action),
        Some(Commands::Export { file }) => bookmark_commands::export(services, file),
        Some(Commands::Import { file }) => bookmark_commands::import(services, file),
        Some(Commands::Init) => bookmark_commands::init(services, settings),
        Some(Commands::FormatUrl { url }) => bookmark_commands::format_url_command(url),
        None => Ok(()),
    }
}

/// Exit status for a failed command.
pub fn exit_code(err: &CliError) -> i32 {
    let kind = match err {
        CliError::Application(app) => app.kind(),
        _ => None,
    };
    match (err, kind) {
        (_, Some(ErrorKind::FetchFailed)) => exitcode::UNAVAILABLE,
        (_, Some(ErrorKind::ImportFailed | ErrorKind::CorruptState)) => exitcode::DATAERR,
        (_, Some(ErrorKind::Storage)) | (CliError::Io(_), _) => exitcode::IOERR,
        (CliError::Application(ApplicationError::Other(_)), _) => exitcode::IOERR,
        _ => exitcode::USAGE,
    }
}

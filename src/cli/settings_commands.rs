// src/cli/settings_commands.rs
use crate::cli::args::SettingsAction;
use crate::cli::display::render_settings;
use crate::cli::error::{CliError, CliResult};
use crate::domain::favicon::validate_url;
use crate::domain::settings::{GridCols, SourceFilter};
use crate::infrastructure::di::ServiceContainer;
use tracing::instrument;

#[instrument(skip(services))]
pub fn handle(services: &ServiceContainer, action: SettingsAction) -> CliResult<()> {
    let settings_service = &services.settings_service;

    match action {
        SettingsAction::Show { is_json } => {
            let settings = settings_service.get()?;
            if is_json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                println!("{}", render_settings(&settings));
            }
        }
        SettingsAction::Set {
            grid_cols,
            show_titles,
            default_category,
            source,
            server_url,
        } => {
            let mut settings = settings_service.get()?;
            if let Some(columns) = grid_cols {
                settings.grid_cols = GridCols::from_columns(columns).ok_or_else(|| {
                    CliError::InvalidInput(format!("grid columns must be 2 to 6, got {}", columns))
                })?;
            }
            if let Some(show_titles) = show_titles {
                settings.show_titles = show_titles;
            }
            if let Some(default_category) = default_category {
                settings.default_category = default_category;
            }
            if let Some(source) = source {
                settings.bookmark_source = source
                    .parse::<SourceFilter>()
                    .map_err(|e| CliError::InvalidInput(e.to_string()))?;
            }
            if let Some(server_url) = server_url {
                settings.server_bookmarks_url = validate_url(&server_url)?;
            }
            let saved = settings_service.save(settings)?;
            eprintln!("{}", render_settings(&saved));
        }
        SettingsAction::ToggleGrid => {
            let settings = settings_service.toggle_grid()?;
            eprintln!("Grid columns: {}", settings.grid_cols.columns());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::di::test_container::TestServiceContainer;
    use rstest::rstest;

    fn set(grid_cols: Option<u8>, source: Option<&str>) -> SettingsAction {
        SettingsAction::Set {
            grid_cols,
            show_titles: None,
            default_category: None,
            source: source.map(str::to_string),
            server_url: None,
        }
    }

    #[test]
    fn given_valid_values_when_set_then_saved() {
        let services = TestServiceContainer::new();

        handle(&services, set(Some(5), Some("manual"))).unwrap();

        let settings = services.settings_service.get().unwrap();
        assert_eq!(settings.grid_cols, GridCols::Five);
        assert_eq!(settings.bookmark_source, SourceFilter::Manual);
    }

    #[rstest]
    #[case::too_many_columns(Some(9), None)]
    #[case::unknown_source(None, Some("cloud"))]
    fn given_invalid_value_when_set_then_invalid_input(
        #[case] grid_cols: Option<u8>,
        #[case] source: Option<&str>,
    ) {
        let services = TestServiceContainer::new();
        let result = handle(&services, set(grid_cols, source));
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}

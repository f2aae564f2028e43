// src/cli/category_commands.rs
use crate::application::services::category_service::CategoryService;
use crate::cli::args::CategoryAction;
use crate::cli::display::render_categories;
use crate::cli::error::{CliError, CliResult};
use crate::domain::error::DomainError;
use crate::infrastructure::di::ServiceContainer;
use crossterm::style::Stylize;
use tracing::instrument;

#[instrument(skip(services))]
pub fn handle(services: &ServiceContainer, action: CategoryAction) -> CliResult<()> {
    let category_service = &services.category_service;

    match action {
        CategoryAction::List => {
            let categories = category_service.list()?;
            let default_category = services.settings_service.get()?.default_category;
            print!("{}", render_categories(&categories, &default_category));
        }
        CategoryAction::Add { name, color } => {
            let category = category_service.add(&name, color.as_deref())?;
            eprintln!("Added category {}", category.name.as_str().green());
            println!("{}", category.id);
        }
        CategoryAction::Edit { id, name, color } => {
            edit(category_service.as_ref(), &id, name, color)?;
        }
        CategoryAction::Delete { id } => {
            category_service.delete(&id)?;
            eprintln!("Deleted category {}", id);
        }
    }
    Ok(())
}

fn edit(
    category_service: &dyn CategoryService,
    id: &str,
    name: Option<String>,
    color: Option<String>,
) -> CliResult<()> {
    if name.is_none() && color.is_none() {
        return Err(CliError::InvalidInput(
            "Nothing to change, pass --name or --color".to_string(),
        ));
    }

    let mut category = category_service
        .list()?
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| DomainError::CategoryNotFound(id.to_string()))?;
    if let Some(name) = name {
        category.name = name;
    }
    if color.is_some() {
        category.color = color;
    }

    let updated = category_service.update(category)?;
    eprintln!("Updated category {}", updated.name.as_str().green());
    Ok(())
}

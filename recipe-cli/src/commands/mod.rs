//! CLI command implementations

pub mod fixture;
pub mod image_path;
pub mod logs;
pub mod user;

use std::path::PathBuf;

use anyhow::{Context, Result};
use recipe_core::{EntryPoint, LogEvent, LoggingService, RecipeContext};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let recipes_dir = get_recipes_dir().ok()?;
    LoggingService::new(&recipes_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the recipes directory from environment or default
pub fn get_recipes_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("RECIPES_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".recipes"))
        .context("Could not find home directory; set RECIPES_DIR")
}

/// Build a recipe context from the settings in the recipes directory
pub fn get_context() -> Result<RecipeContext> {
    let recipes_dir = get_recipes_dir()?;
    RecipeContext::new(&recipes_dir).context("Failed to initialize recipe context")
}

//! Recipe Core - Business logic for the recipe backend
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (User, Tag, Ingredient, Recipe)
//! - **ports**: Trait definitions for external dependencies (Repository, IdGenerator)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (in-memory store, UUID identifiers)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::ids::RandomIdGenerator;
use adapters::memory::MemoryRepository;
use config::Config;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{Ingredient, Recipe, Tag, User};
pub use services::{EntryPoint, LogEvent, LoggingService};

/// Main context for recipe operations
///
/// Holds the configuration, the repository and all services wired to it.
pub struct RecipeContext {
    pub config: Config,
    pub repository: Arc<MemoryRepository>,
    pub user_service: UserService,
    pub catalog_service: CatalogService,
    pub fixture_service: FixtureService,
}

impl RecipeContext {
    /// Create a context from the settings in `recipes_dir`
    pub fn new(recipes_dir: &Path) -> Result<Self> {
        let config = Config::load(recipes_dir)?;
        Ok(Self::from_config(config))
    }

    /// Create a context backed by a fresh in-memory repository
    pub fn from_config(config: Config) -> Self {
        let repository = Arc::new(MemoryRepository::new());

        let uploads = UploadPathGenerator::shared(RandomIdGenerator)
            .with_prefix(config.recipe_image_dir.as_str());
        let user_service = UserService::new(repository.clone())
            .with_min_password_length(config.min_password_length);
        let catalog_service = CatalogService::with_upload_paths(repository.clone(), uploads);
        let fixture_service = FixtureService::new(user_service.clone(), catalog_service.clone());

        Self {
            config,
            repository,
            user_service,
            catalog_service,
            fixture_service,
        }
    }
}

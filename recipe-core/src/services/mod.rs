//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod catalog;
pub mod fixture;
pub mod logging;
pub mod upload;
mod user;

pub use catalog::{CatalogService, NewRecipe, RecipeDetail};
pub use fixture::{FixtureDocument, FixtureReport, FixtureService};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use upload::{recipe_image_file_path, UploadPathFn, UploadPathGenerator, RECIPE_IMAGE_DIR};
pub use user::{ExtraFields, UserService};

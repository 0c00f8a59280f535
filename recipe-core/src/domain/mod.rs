//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod ingredient;
pub mod password;
mod recipe;
pub mod result;
mod tag;
mod user;

pub use ingredient::Ingredient;
pub use recipe::{Recipe, PRICE_SCALE};
pub use tag::Tag;
pub use user::User;

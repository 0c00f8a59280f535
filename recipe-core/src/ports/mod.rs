//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod id_generator;
mod repository;

pub use id_generator::IdGenerator;
pub use repository::Repository;

//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - In-memory maps for the Repository port
//! - UUIDv4 and fixed identifiers for the IdGenerator port

pub mod ids;
pub mod memory;

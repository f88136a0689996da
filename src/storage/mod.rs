//! Storage module
//!
//! One SQLite-backed store holds the whole catalog.

pub mod sqlite;

// Re-export main storage types
pub use sqlite::{CatalogStats, CatalogStore, SqliteConfig};

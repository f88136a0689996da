// File: src/storage/sqlite/mod.rs

mod assumptions;
mod config;
mod convert;
mod dump;
mod paths;
mod runs;
mod scenarios;
mod schema;
mod store;
mod timeseries;

// Public exports
pub use config::{CatalogStats, SqliteConfig};
pub use store::CatalogStore;

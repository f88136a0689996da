//! csrs-server library exports (for testing and embedding)

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod traits;

// Re-exports
pub use client::{EmbeddedCatalog, RemoteCatalog};
pub use error::{CatalogError, CatalogResult};
pub use storage::CatalogStore;
pub use traits::{Catalog, SeriesReader};

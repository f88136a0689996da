//! Client facades and container ingestion

pub mod container;
pub mod embedded;
pub mod ingest;
pub mod remote;

// Re-export all types
#[allow(unused_imports)]
pub use container::JsonSeriesFile;

#[allow(unused_imports)]
pub use embedded::EmbeddedCatalog;

#[allow(unused_imports)]
pub use ingest::from_container;

#[allow(unused_imports)]
pub use remote::RemoteCatalog;

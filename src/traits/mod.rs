//! Trait definitions for the catalog's seams

pub mod catalog;
pub mod container;

// Re-export all types
#[allow(unused_imports)]
pub use catalog::Catalog;

#[allow(unused_imports)]
pub use container::{SeriesRecord, SeriesReader};

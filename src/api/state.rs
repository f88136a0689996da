//! Application state

use std::sync::Arc;

use crate::storage::CatalogStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog store every handler works against
    pub store: Arc<CatalogStore>,

    /// Whether GET /dump is mounted
    pub allow_download: bool,

    /// Whether the PATCH/DELETE editing surface is mounted
    pub allow_editing: bool,

    /// Level at which per-request access lines are emitted
    pub access_level: tracing::Level,
}

impl AppState {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self {
            store,
            allow_download: true,
            allow_editing: false,
            access_level: tracing::Level::INFO,
        }
    }
}

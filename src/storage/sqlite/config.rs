// File: src/storage/sqlite/config.rs

/// SQLite catalog store configuration
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path to database file (or ":memory:" for in-memory)
    pub path: String,

    /// Enable WAL mode for better concurrency
    pub wal_mode: bool,

    /// Busy timeout in milliseconds
    pub busy_timeout_ms: u32,

    /// Enable foreign key enforcement
    pub foreign_keys: bool,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: "csrs.db".to_string(),
            wal_mode: true,
            busy_timeout_ms: 5000,
            foreign_keys: true,
        }
    }
}

/// Catalog row counts by family
#[derive(Debug, Clone, Copy)]
pub struct CatalogStats {
    pub assumptions: u64,
    pub scenarios: u64,
    pub runs: u64,
    pub paths: u64,
    pub ledger_rows: u64,
}

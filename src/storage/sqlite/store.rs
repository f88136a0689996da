// File: src/storage/sqlite/store.rs

use super::config::{CatalogStats, SqliteConfig};
use super::schema;
use crate::error::{CatalogError, CatalogResult};
use rusqlite::{Connection, Transaction};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// SQLite-backed scenario results catalog
///
/// One connection behind a mutex; every operation runs as a single
/// transaction through `with_tx`.
pub struct CatalogStore {
    /// Database connection (protected by mutex for thread safety)
    conn: Arc<Mutex<Connection>>,

    /// Configuration (kept for diagnostics)
    #[allow(dead_code)]
    config: SqliteConfig,
}

impl CatalogStore {
    /// Create a new CatalogStore with default configuration
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn new<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let config = SqliteConfig {
            path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Create with custom configuration
    pub fn with_config(config: SqliteConfig) -> CatalogResult<Self> {
        let conn = Connection::open(&config.path)
            .map_err(|e| CatalogError::Config(format!("failed to open db: {}", e)))?;

        Self::configure_connection(&conn, &config)?;
        schema::create_tables(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            config,
        })
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> CatalogResult<Self> {
        let config = SqliteConfig {
            path: ":memory:".to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Open an existing database (fails if doesn't exist)
    pub fn open<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        if !path.as_ref().exists() {
            return Err(CatalogError::Config("database does not exist".into()));
        }
        Self::new(path)
    }

    /// Configure SQLite connection pragmas
    fn configure_connection(conn: &Connection, config: &SqliteConfig) -> CatalogResult<()> {
        if config.wal_mode {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }
        conn.pragma_update(None, "busy_timeout", config.busy_timeout_ms)?;
        if config.foreign_keys {
            conn.pragma_update(None, "foreign_keys", "ON")?;
        }
        // Performance optimizations
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "cache_size", -64000)?; // 64MB cache
        Ok(())
    }

    /// Get locked connection for internal operations
    pub(crate) fn get_conn(&self) -> CatalogResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| CatalogError::Internal("connection lock poisoned".into()))
    }

    /// Run `f` inside a single transaction
    ///
    /// Commits on Ok; the transaction rolls back on drop if `f` fails.
    pub(crate) fn with_tx<T, F>(&self, f: F) -> CatalogResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> CatalogResult<T>,
    {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
    }

    /// Get catalog statistics
    pub fn stats(&self) -> CatalogResult<CatalogStats> {
        let conn = self.get_conn()?;
        Ok(CatalogStats {
            assumptions: count_rows(&conn, "assumptions")?,
            scenarios: count_rows(&conn, "scenarios")?,
            runs: count_rows(&conn, "runs")?,
            paths: count_rows(&conn, "named_paths")?,
            ledger_rows: count_rows(&conn, "timeseries_ledger")?,
        })
    }
}

fn count_rows(conn: &Connection, table: &str) -> CatalogResult<u64> {
    // `table` is always one of our fixed table names, never user input
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })?;
    Ok(count as u64)
}

//! Server configuration

use crate::error::{CatalogError, CatalogResult};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> CatalogResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(CatalogError::Config(format!(
                "unknown log format '{}', expected text or json",
                other
            ))),
        }
    }
}

/// Parse a log level name into a tracing level
pub fn parse_level(s: &str) -> CatalogResult<tracing::Level> {
    s.parse::<tracing::Level>()
        .map_err(|_| CatalogError::Config(format!("unknown log level '{}'", s)))
}

/// Database settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite file backing the catalog (created on first start)
    pub source: String,
    /// Whether GET /dump is mounted
    pub allow_download: bool,
    /// Whether the PATCH/DELETE editing surface is mounted
    pub allow_editing_via_forms: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            source: "./csrs.db".to_string(),
            allow_download: true,
            allow_editing_via_forms: false,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directive for the global subscriber
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Level for per-request access lines
    pub access_level: tracing::Level,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            access_level: tracing::Level::INFO,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load from environment variables
    ///
    /// The binary feeds the same variables through clap. This path exists
    /// for embedders that configure the server without a command line.
    #[allow(dead_code)]
    pub fn from_env() -> CatalogResult<Self> {
        let defaults = Config::default();

        let host = std::env::var("CSRS_HOST").unwrap_or(defaults.host);
        let port = std::env::var("CSRS_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let source = std::env::var("CSRS_DATABASE_SOURCE").unwrap_or(defaults.database.source);
        let allow_download = std::env::var("CSRS_ALLOW_DOWNLOAD")
            .ok()
            .map(|s| s == "true" || s == "1")
            .unwrap_or(defaults.database.allow_download);
        let allow_editing_via_forms = std::env::var("CSRS_ALLOW_EDITING_VIA_FORMS")
            .ok()
            .map(|s| s == "true" || s == "1")
            .unwrap_or(defaults.database.allow_editing_via_forms);

        let level = std::env::var("CSRS_LOG_LEVEL").unwrap_or(defaults.logging.level);
        let format = match std::env::var("CSRS_LOG_FORMAT") {
            Ok(s) => LogFormat::parse(&s)?,
            Err(_) => defaults.logging.format,
        };
        let access_level = match std::env::var("CSRS_ACCESS_LOG_LEVEL") {
            Ok(s) => parse_level(&s)?,
            Err(_) => defaults.logging.access_level,
        };

        Ok(Self {
            host,
            port,
            database: DatabaseConfig {
                source,
                allow_download,
                allow_editing_via_forms,
            },
            logging: LoggingConfig {
                level,
                format,
                access_level,
            },
        })
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

//! csrs-server - scenario results catalog for water-resources model runs

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use csrs_server::api::{self, AppState};
use csrs_server::config::{self, Config, DatabaseConfig, LogFormat, LoggingConfig};
use csrs_server::CatalogStore;

#[derive(Parser, Debug)]
#[command(name = "csrs-server")]
#[command(about = "Scenario results catalog for water-resources model runs")]
struct Args {
    /// Host to bind to
    #[arg(long, env = "CSRS_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to
    #[arg(long, env = "CSRS_PORT", default_value = "8000")]
    port: u16,

    /// Path to the SQLite database (created on first start)
    #[arg(long, env = "CSRS_DATABASE_SOURCE", default_value = "./csrs.db")]
    database: String,

    /// Whether GET /dump is mounted
    #[arg(long, env = "CSRS_ALLOW_DOWNLOAD", default_value = "true")]
    allow_download: bool,

    /// Whether PATCH/DELETE editing routes are mounted
    #[arg(long, env = "CSRS_ALLOW_EDITING_VIA_FORMS", default_value = "false")]
    allow_editing_via_forms: bool,

    /// Log filter directive
    #[arg(long, env = "CSRS_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log output format: text or json
    #[arg(long, env = "CSRS_LOG_FORMAT", default_value = "text")]
    log_format: String,

    /// Level for per-request access log lines
    #[arg(long, env = "CSRS_ACCESS_LOG_LEVEL", default_value = "info")]
    access_log_level: String,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        Ok(Config {
            host: self.host,
            port: self.port,
            database: DatabaseConfig {
                source: self.database,
                allow_download: self.allow_download,
                allow_editing_via_forms: self.allow_editing_via_forms,
            },
            logging: LoggingConfig {
                level: self.log_level,
                format: LogFormat::parse(&self.log_format)?,
                access_level: config::parse_level(&self.access_log_level)?,
            },
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI args
    let args = Args::parse();
    let config = args.into_config()?;

    // Initialize logging
    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.logging.level));
    match config.logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting csrs-server v{}", env!("CARGO_PKG_VERSION"));

    let store = CatalogStore::new(&config.database.source)?;
    let stats = store.stats()?;
    tracing::info!(
        assumptions = stats.assumptions,
        scenarios = stats.scenarios,
        runs = stats.runs,
        paths = stats.paths,
        ledger_rows = stats.ledger_rows,
        "catalog opened"
    );

    let state = Arc::new(AppState {
        store: Arc::new(store),
        allow_download: config.database.allow_download,
        allow_editing: config.database.allow_editing_via_forms,
        access_level: config.logging.access_level,
    });

    let app = api::create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

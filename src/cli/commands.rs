//! CLI command implementations
//!
//! Startup order matters: `.env` is loaded before the logger reads
//! `LOG_FORMAT`/`RUST_LOG` and before clap reads the connection variables.

use std::sync::Arc;

use tracing::{info, warn};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::logging::{init_logging, LoggingConfig};
use crate::store::{MongoEmployeeStore, StoreConfig};

use super::args::Cli;
use super::errors::{CliError, CliResult};

/// Everything needed to start serving
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub store: StoreConfig,
    pub http: HttpServerConfig,
}

impl ServeConfig {
    /// Validate parsed arguments; fails if any store setting is missing
    pub fn from_cli(cli: Cli) -> CliResult<Self> {
        let store = StoreConfig::from_parts(
            cli.mongodb_uri,
            cli.mongodb_db_name,
            cli.mongodb_collection_name,
        )?;

        Ok(Self {
            store,
            http: HttpServerConfig {
                host: cli.host,
                port: cli.port,
            },
        })
    }
}

/// Main CLI entry point
///
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let dotenv = dotenvy::dotenv();

    init_logging(LoggingConfig::from_env()).map_err(CliError::logging_error)?;
    if let Err(e) = dotenv {
        warn!(error = %e, "could not load .env file");
    }

    let config = ServeConfig::from_cli(Cli::parse_args())?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(serve(config))
}

/// Connect to the store and serve HTTP until shutdown
pub async fn serve(config: ServeConfig) -> CliResult<()> {
    let store = MongoEmployeeStore::connect(&config.store).await?;

    let server = HttpServer::with_config(config.http, Arc::new(store));
    info!(addr = %server.socket_addr(), "starting employee API");

    server
        .start()
        .await
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
}

//! Excel MCP server entry point.
//!
//! Loads configuration from the environment (and `.env`), sets up logging on
//! stderr, then serves the Excel tools over the configured transport.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use excel_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    match &config.security.root_path {
        Some(root) => info!("Workbook paths restricted to {}", root.display()),
        None => info!("Workbook paths unrestricted"),
    }

    let server = McpServer::new(config.clone());
    info!("Serving {} tools", server.list_tools().len());

    TransportService::new(config.transport)
        .run(server)
        .await
        .context("transport stopped with an error")?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// `RUST_LOG` wins when set; otherwise `MCP_LOG_LEVEL` applies to the whole
/// process. Output goes to stderr because stdout carries the STDIO protocol.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.to_lowercase()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

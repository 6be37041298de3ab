//! OSRM MCP server binary.
//!
//! Loads configuration from the environment, sets up logging on stderr and
//! serves the routing tools on the configured transport.

use anyhow::{Context, Result};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use osrm_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config.logging.level)?;

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!(
        "Routing engine at {} (timeout {}s)",
        config.osrm.base_url, config.osrm.timeout_secs
    );

    let server = McpServer::new(config.clone()).context("failed to build MCP server")?;

    TransportService::new(config.transport).run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs are written to stderr; in STDIO mode stdout belongs to the protocol.
/// The HTTP client internals are capped at `warn` so per-call logs stay
/// readable at `debug`.
fn init_logging(level: &str) -> Result<()> {
    let level = match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("hyper_util=warn".parse()?)
        .add_directive("h2=warn".parse()?);

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

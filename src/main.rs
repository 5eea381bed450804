//! `wp-mcp-bridge` server binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use wp_mcp_bridge::config;
use wp_mcp_bridge::lifecycle::Shutdown;
use wp_mcp_bridge::observability::{logging, metrics};
use wp_mcp_bridge::HttpServer;

#[derive(Parser)]
#[command(name = "wp-mcp-bridge", version)]
#[command(about = "WordPress REST proxy with a JSON-RPC tool endpoint", long_about = None)]
struct Cli {
    /// Optional TOML file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.listener.port = port;
        config::validate_config(&config).map_err(config::ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);

    tracing::info!("wp-mcp-bridge v{} starting", env!("CARGO_PKG_VERSION"));
    let upstream = &config.upstream;
    let missing = upstream.missing();
    let set_or_not = |absent: bool| if absent { "Not set" } else { "Set" };
    tracing::info!(
        wp_url = upstream.url.as_deref().unwrap_or("<unset>"),
        username = set_or_not(missing.username),
        password = set_or_not(missing.password),
        timeout_secs = ?upstream.timeout_secs,
        "Configuration loaded"
    );
    if missing.any() {
        tracing::warn!(missing = %missing, "WordPress credentials incomplete, proxying disabled");
    }

    if let Some(addr) = &config.observability.metrics_address {
        match addr.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(metrics_address = %addr, "Failed to parse metrics address"),
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(
        health = %format!("http://{local_addr}/health"),
        mcp = %format!("http://{local_addr}/mcp"),
        "Listening for connections"
    );

    // Never triggered here; OS signals drive shutdown.
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

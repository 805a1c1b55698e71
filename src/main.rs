use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use grant_proxy::config::loader::load_config;
use grant_proxy::observability::{logging, metrics};
use grant_proxy::{HttpServer, ProxyConfig, Shutdown};

#[derive(Parser)]
#[command(name = "grant-proxy")]
#[command(about = "OAuth2 grant-type forwarding proxy", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!("grant-proxy v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_host = %config.upstream.host,
        token_path = %config.upstream.token_path,
        refresh_path = %config.upstream.refresh_path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

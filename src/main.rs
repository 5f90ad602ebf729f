use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use openrouter_relay::config::{load_config, validate_config, ConfigError, RelayConfig};
use openrouter_relay::lifecycle::{signals, Shutdown};
use openrouter_relay::observability::init_logging;
use openrouter_relay::HttpServer;

#[derive(Parser)]
#[command(name = "openrouter-relay")]
#[command(about = "Relays /v1/models and /v1/chat/completions to the Kilo Code OpenRouter API", long_about = None)]
struct Cli {
    /// TOML file with listener, timeout and logging settings
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:31233
    #[arg(short, long, env = "RELAY_BIND_ADDRESS")]
    bind: Option<String>,
}

fn resolve_config(cli: &Cli) -> Result<RelayConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        connect_timeout_secs = config.timeouts.connect_secs,
        response_timeout_secs = config.timeouts.response_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!("Relay listening on port {}", local_addr.port());
    tracing::info!("Access at http://{}", local_addr);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! Generative AI gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                  GATEWAY                     │
//!   Client Request      │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!   ────────────────────┼─▶│  http  │──▶│ throttle │──▶│   prompt   │  │
//!                       │  │ server │   │(summarize│   │  assembly  │  │
//!                       │  └────────┘   │   only)  │   └─────┬──────┘  │
//!                       │               └──────────┘         │         │
//!                       │                                    ▼         │
//!   Client Response     │  ┌────────┐                 ┌────────────┐   │
//!   ◀───────────────────┼──│ relay  │◀────────────────│  upstream  │◀──┼── OpenAI API
//!                       │  └────────┘                 │   client   │   │
//!                       │                             └────────────┘   │
//!                       │  config · lifecycle · observability          │
//!                       └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use genai_proxy::config::{self, Deployment, GatewayConfig};
use genai_proxy::lifecycle::{self, signals, Shutdown};
use genai_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "genai-proxy")]
#[command(about = "Proxy for summarize, slide, and image generation requests", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route set to serve (summarizer or slides).
    #[arg(short, long)]
    deployment: Option<Deployment>,

    /// Listen port. Overrides PORT and the config file.
    #[arg(short, long)]
    port: Option<u16>,
}

fn load(cli: &Cli) -> Result<GatewayConfig, config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => GatewayConfig::default(),
    };

    config::apply_env(&mut config)?;

    if let Some(deployment) = cli.deployment {
        config.deployment = deployment;
    }
    if let Some(port) = cli.port {
        config.listener.port = Some(port);
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = load(&cli).map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    logging::init_tracing(&config.observability.log_level);
    tracing::info!("genai-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let (server, listener) = lifecycle::prepare(config).await?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

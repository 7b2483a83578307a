//! Startup orchestration.
//!
//! # Responsibilities
//! - Apply the missing-credential policy before anything binds
//! - Start the metrics exporter when enabled
//! - Bind the listener and build the server
//!
//! # Design Decisions
//! - Strict policy fails before the port is bound
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{GatewayConfig, MissingKeyPolicy};
use crate::http::GatewayServer;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("OPENAI_API_KEY not set; refusing to start (upstream.missing_key_policy = \"strict\")")]
    MissingCredential,

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Apply the configured policy for an absent credential.
pub fn enforce_credential_policy(config: &GatewayConfig) -> Result<(), StartupError> {
    if config.upstream.api_key.is_some() {
        return Ok(());
    }

    match config.upstream.missing_key_policy {
        MissingKeyPolicy::Strict => {
            tracing::error!("OPENAI_API_KEY not set. Put it in the environment or a .env file.");
            Err(StartupError::MissingCredential)
        }
        MissingKeyPolicy::Lenient => {
            tracing::warn!(
                "OPENAI_API_KEY not set; upstream-bound requests will fail until it is configured"
            );
            Ok(())
        }
    }
}

/// Check policy, start metrics, bind the listener, and build the server.
pub async fn prepare(config: GatewayConfig) -> Result<(GatewayServer, TcpListener), StartupError> {
    enforce_credential_policy(&config)?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    tracing::info!(
        address = %address,
        deployment = config.deployment.as_str(),
        throttle_ms = ?config.throttle.enabled.then_some(config.throttle.min_interval_ms),
        "Configuration loaded"
    );

    Ok((GatewayServer::new(config), listener))
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the deployment's routes
//! - Wire up middleware (tracing, request ID, limits, optional timeout)
//! - Bind server to listener
//! - Stop on the shutdown broadcast

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{Deployment, GatewayConfig};
use crate::http::handlers;
use crate::security::{limits::apply_limits, Throttle};
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub upstream: UpstreamClient,
    pub throttle: Arc<Throttle>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        let upstream = UpstreamClient::new(&config.upstream);
        let throttle = Arc::new(Throttle::from_config(&config.throttle));
        Self {
            config: Arc::new(config),
            upstream,
            throttle,
        }
    }
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    state: AppState,
}

impl GatewayServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_state(AppState::new(config))
    }

    pub fn with_state(state: AppState) -> Self {
        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let config = state.config.clone();

        let routes = match config.deployment {
            Deployment::Summarizer => Router::new().route("/api/summarize", post(handlers::summarize)),
            Deployment::Slides => Router::new()
                .route("/api/generate-slides", post(handlers::generate_slides))
                .route("/api/generate-image", post(handlers::generate_image)),
        };

        let mut router = routes
            .route("/api/health", get(handlers::health))
            .with_state(state);

        if let Some(secs) = config.timeouts.request_secs {
            router = router.layer(TimeoutLayer::new(Duration::from_secs(secs)));
        }

        apply_limits(router, &config.security)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id,
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            deployment = self.state.config.deployment.as_str(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

//! Request size limits and cross-origin policy.

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

use crate::config::SecurityConfig;

/// Wrap `router` with the body size cap and, when enabled, a permissive CORS layer.
pub fn apply_limits(router: Router, config: &SecurityConfig) -> Router {
    let router = router
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(RequestBodyLimitLayer::new(config.max_body_size));

    if config.cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (temperatures, token limits, body size)
//! - Check the upstream base URL is a usable http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("upstream.base_url '{0}' is not a valid http(s) URL")]
    InvalidBaseUrl(String),

    #[error("{section}.max_tokens must be greater than 0")]
    ZeroMaxTokens { section: &'static str },

    #[error("{section}.temperature {value} is outside 0.0..=2.0")]
    TemperatureOutOfRange { section: &'static str, value: f32 },

    #[error("{section}.n must be greater than 0")]
    ZeroChoices { section: &'static str },

    #[error("security.max_body_size must be greater than 0")]
    ZeroBodyLimit,

    #[error("timeouts.request_secs must be greater than 0 when set")]
    ZeroRequestTimeout,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(
            config.upstream.base_url.clone(),
        )),
    }

    if config.summarize.max_tokens == 0 {
        errors.push(ValidationError::ZeroMaxTokens { section: "summarize" });
    }
    if config.slides.max_tokens == 0 {
        errors.push(ValidationError::ZeroMaxTokens { section: "slides" });
    }

    for (section, value) in [
        ("summarize", config.summarize.temperature),
        ("slides", config.slides.temperature),
    ] {
        if !(0.0..=2.0).contains(&value) {
            errors.push(ValidationError::TemperatureOutOfRange { section, value });
        }
    }

    if config.summarize.n == 0 {
        errors.push(ValidationError::ZeroChoices { section: "summarize" });
    }
    if config.image.n == 0 {
        errors.push(ValidationError::ZeroChoices { section: "image" });
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.timeouts.request_secs == Some(0) {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

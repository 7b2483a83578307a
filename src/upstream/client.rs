//! HTTP client for the upstream generative AI API.

use std::time::Instant;

use axum::http::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::observability::metrics;

/// Upstream endpoints the gateway calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ChatCompletions,
    ImageGenerations,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::ChatCompletions => "/v1/chat/completions",
            Endpoint::ImageGenerations => "/v1/images/generations",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Endpoint::ChatCompletions => "chat_completions",
            Endpoint::ImageGenerations => "image_generations",
        }
    }
}

/// Errors raised before an upstream status is available.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// No credential was configured at startup.
    #[error("Server not configured with OpenAI key")]
    MissingCredential,

    /// Connection, TLS, or body read failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Status and raw body of an upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: String,
}

/// Client for the upstream API.
///
/// Issues exactly one request per call: no retries, and no timeout beyond
/// the transport defaults.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    pub fn with_http(http: reqwest::Client, config: &UpstreamConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// POST `body` as JSON to `endpoint` with the bearer credential attached.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<UpstreamReply, UpstreamError> {
        let api_key = self.api_key.as_ref().ok_or(UpstreamError::MissingCredential)?;
        let start = Instant::now();

        let response = self
            .http
            .post(self.url(endpoint))
            .bearer_auth(api_key.expose_secret())
            .json(body)
            .send()
            .await;

        let result = match response {
            Ok(response) => {
                let status = response.status();
                response
                    .text()
                    .await
                    .map(|body| UpstreamReply { status, body })
                    .map_err(UpstreamError::from)
            }
            Err(e) => Err(UpstreamError::from(e)),
        };

        metrics::record_upstream_call(endpoint.label(), result.is_ok(), start);

        if let Ok(reply) = &result {
            tracing::debug!(
                endpoint = endpoint.label(),
                status = %reply.status,
                bytes = reply.body.len(),
                "Upstream responded"
            );
        }

        result
    }
}

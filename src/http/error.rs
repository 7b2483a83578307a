//! Error envelope returned to callers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::prompt::TextRejection;
use crate::upstream::UpstreamError;

/// Failures a handler can report.
///
/// Every variant renders as `{"error": ...}`, with a `detail` field where the
/// cause is worth passing on.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller sent something unusable. 400.
    #[error("{0}")]
    InvalidInput(String),

    /// No upstream credential configured. 500.
    #[error("Server not configured with OpenAI key")]
    MissingCredential,

    /// Upstream answered with a non-success status. 500, raw body as detail.
    #[error("OpenAI API error")]
    Upstream { status: StatusCode, detail: String },

    /// Local fault such as a network error or undecodable body. 500.
    #[error("Server error")]
    Internal { detail: String },

    /// Fault on a relay route, reported without detail. 500.
    #[error("{0}")]
    RouteFailure(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TextRejection> for ApiError {
    fn from(rejection: TextRejection) -> Self {
        ApiError::InvalidInput(rejection.to_string())
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::MissingCredential => ApiError::MissingCredential,
            UpstreamError::Transport(e) => ApiError::Internal {
                detail: e.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Upstream { status, .. } = &self {
            tracing::debug!(upstream_status = %status, "Mapping upstream failure to 500");
        }
        let body = match &self {
            ApiError::Upstream { detail, .. } | ApiError::Internal { detail } => {
                json!({ "error": self.to_string(), "detail": detail })
            }
            _ => json!({ "error": self.to_string() }),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_upstream_error_carries_raw_detail() {
        let raw = r#"{"error":{"message":"quota exceeded"}}"#;
        let (status, body) = body_json(ApiError::Upstream {
            status: StatusCode::TOO_MANY_REQUESTS,
            detail: raw.to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "OpenAI API error");
        assert_eq!(body["detail"], raw);
    }

    #[tokio::test]
    async fn test_input_errors_are_bad_request() {
        let (status, body) = body_json(TextRejection::Missing.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing text to summarize"}));
    }

    #[tokio::test]
    async fn test_missing_credential_message() {
        let (status, body) = body_json(UpstreamError::MissingCredential.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Server not configured with OpenAI key"}));
    }

    #[tokio::test]
    async fn test_route_failure_has_no_detail() {
        let (_, body) = body_json(ApiError::RouteFailure("Image generation failed")).await;
        assert_eq!(body, json!({"error": "Image generation failed"}));
    }
}

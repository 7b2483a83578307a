//! Route handlers.
//!
//! Each handler makes at most one upstream call. Nothing is retried.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::prompt::{self, selector, Style};
use crate::upstream::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Endpoint, ImageGenerationRequest,
};

/// Body of `POST /api/summarize`.
///
/// Every field is kept untyped: `text` so non-string values reach validation,
/// the selectors so any value is interpolated into the prompt.
#[derive(Debug, Default, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub length: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub style: Option<Value>,
    /// Accepted for compatibility; only the upstream path exists.
    #[serde(default, deserialize_with = "present")]
    pub mode: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Body of `POST /api/generate-slides`.
#[derive(Debug, Default, Deserialize)]
pub struct SlideRequest {
    #[serde(default, deserialize_with = "present")]
    pub text: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub language: Option<Value>,
}

/// Body of `POST /api/generate-image`.
#[derive(Debug, Default, Deserialize)]
pub struct ImageRequest {
    #[serde(default, deserialize_with = "present")]
    pub prompt: Option<Value>,
}

/// Maps a field that is present to `Some`, an explicit `null` included.
/// Absent fields stay `None` through `#[serde(default)]`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn finish<T: IntoResponse>(
    route: &'static str,
    start: Instant,
    result: Result<T, ApiError>,
) -> Response {
    let response = result.into_response();
    metrics::record_request(route, response.status().as_u16(), start);
    response
}

fn bad_json(rejection: JsonRejection) -> ApiError {
    tracing::warn!(error = %rejection.body_text(), "Rejected request body");
    ApiError::InvalidInput(rejection.body_text())
}

/// `GET /api/health`.
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// `POST /api/summarize`.
pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    state.throttle.wait().await;
    finish("summarize", start, summarize_inner(&state, payload).await)
}

async fn summarize_inner(
    state: &AppState,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let Json(request) = payload.map_err(bad_json)?;
    let config = &state.config.summarize;

    let text = prompt::summarize::validate_article(request.text.as_ref(), config.min_text_chars)
        .map_err(|rejection| {
            tracing::debug!(reason = %rejection, "Rejected summarize request");
            ApiError::from(rejection)
        })?;

    let length = selector::render(request.length.as_ref(), prompt::summarize::DEFAULT_LENGTH);
    let style = Style::from_value(request.style.as_ref());
    if let Some(mode) = &request.mode {
        tracing::trace!(%mode, "Summarize mode selector ignored");
    }

    let body = ChatCompletionRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage::system(config.system_prompt.clone()),
            ChatMessage::user(prompt::summarize::build_prompt(text, &length, style)),
        ],
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        n: Some(config.n),
    };

    let reply = state
        .upstream
        .post_json(Endpoint::ChatCompletions, &body)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Summarize upstream call failed");
            ApiError::from(e)
        })?;

    if !reply.status.is_success() {
        tracing::error!(status = %reply.status, body = %reply.body, "OpenAI error");
        return Err(ApiError::Upstream {
            status: reply.status,
            detail: reply.body,
        });
    }

    let parsed: ChatCompletionResponse = serde_json::from_str(&reply.body).map_err(|e| {
        tracing::error!(error = %e, "Undecodable chat completion response");
        ApiError::Internal {
            detail: e.to_string(),
        }
    })?;

    Ok(Json(SummaryResponse {
        summary: parsed.summary_text(),
    }))
}

/// `POST /api/generate-slides`.
pub async fn generate_slides(
    State(state): State<AppState>,
    payload: Result<Json<SlideRequest>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    finish("generate_slides", start, generate_slides_inner(&state, payload).await)
}

async fn generate_slides_inner(
    state: &AppState,
    payload: Result<Json<SlideRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(bad_json)?;
    let config = &state.config.slides;
    let text = selector::render(request.text.as_ref(), "");
    let language = selector::render(request.language.as_ref(), "");

    let body = ChatCompletionRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage::system(config.system_prompt.clone()),
            ChatMessage::user(prompt::slides::build_prompt(&text, &language)),
        ],
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        n: None,
    };

    relay(state, Endpoint::ChatCompletions, &body, "Server error").await
}

/// `POST /api/generate-image`.
pub async fn generate_image(
    State(state): State<AppState>,
    payload: Result<Json<ImageRequest>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    finish("generate_image", start, generate_image_inner(&state, payload).await)
}

async fn generate_image_inner(
    state: &AppState,
    payload: Result<Json<ImageRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(bad_json)?;

    let body = ImageGenerationRequest {
        prompt: request.prompt,
        n: state.config.image.n,
        size: state.config.image.size.clone(),
    };

    relay(state, Endpoint::ImageGenerations, &body, "Image generation failed").await
}

/// Forward `body` and hand the upstream JSON back unmodified.
///
/// Upstream error statuses are relayed as-is with a 200; only transport
/// failures and non-JSON bodies become `failure`.
async fn relay<B: Serialize>(
    state: &AppState,
    endpoint: Endpoint,
    body: &B,
    failure: &'static str,
) -> Result<Json<Value>, ApiError> {
    let reply = match state.upstream.post_json(endpoint, body).await {
        Ok(reply) => reply,
        Err(crate::upstream::UpstreamError::MissingCredential) => {
            tracing::error!(endpoint = endpoint.label(), "No upstream credential configured");
            return Err(ApiError::MissingCredential);
        }
        Err(e) => {
            tracing::error!(endpoint = endpoint.label(), error = %e, "Upstream call failed");
            return Err(ApiError::RouteFailure(failure));
        }
    };

    if !reply.status.is_success() {
        tracing::warn!(
            endpoint = endpoint.label(),
            status = %reply.status,
            "Relaying upstream error body"
        );
    }

    serde_json::from_str(&reply.body).map(Json).map_err(|e| {
        tracing::error!(endpoint = endpoint.label(), error = %e, "Upstream body is not JSON");
        ApiError::RouteFailure(failure)
    })
}

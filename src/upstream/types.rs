//! Upstream request bodies and response extraction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Body for `POST /v1/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
}

/// Body for `POST /v1/images/generations`.
///
/// `prompt` is whatever JSON value the caller sent; it is omitted only when
/// the caller left it out.
#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<Value>,
    pub n: u32,
    pub size: String,
}

/// A chat completion response, kept as raw JSON.
///
/// Any document decodes; a missing or null step on the way to the content
/// yields an empty summary rather than an error.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ChatCompletionResponse(Value);

impl ChatCompletionResponse {
    /// First choice's message content, else its legacy `text`, else empty;
    /// trimmed.
    pub fn summary_text(&self) -> String {
        let first = self.0.get("choices").and_then(|choices| choices.get(0));

        let content = first
            .and_then(|choice| choice.get("message"))
            .and_then(|message| non_empty(message.get("content")))
            .or_else(|| non_empty(first.and_then(|choice| choice.get("text"))));

        content.map(|s| s.trim().to_string()).unwrap_or_default()
    }
}

/// Render a JSON value as text, treating null, `false`, `0` and `""` as absent.
///
/// Arrays and objects come back as their JSON text.
fn non_empty(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

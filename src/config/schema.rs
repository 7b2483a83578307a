//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Which route set this process serves.
    pub deployment: Deployment,

    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Upstream API settings.
    pub upstream: UpstreamConfig,

    /// Summarize endpoint settings.
    pub summarize: SummarizeConfig,

    /// Slide generation settings.
    pub slides: SlidesConfig,

    /// Image generation settings.
    pub image: ImageConfig,

    /// Throttle applied before summarize calls.
    pub throttle: ThrottleConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    pub security: SecurityConfig,
}

impl GatewayConfig {
    /// Port the listener binds to once defaults and overrides are applied.
    pub fn effective_port(&self) -> u16 {
        self.listener
            .port
            .unwrap_or_else(|| self.deployment.default_port())
    }

    /// Full bind address (e.g., "0.0.0.0:5173").
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.host, self.effective_port())
    }
}

/// Alternative route sets. One process hosts exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    /// `/api/summarize` + `/api/health`.
    #[default]
    Summarizer,
    /// `/api/generate-slides` + `/api/generate-image` + `/api/health`.
    Slides,
}

impl Deployment {
    pub fn default_port(self) -> u16 {
        match self {
            Deployment::Summarizer => 5173,
            Deployment::Slides => 3000,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Deployment::Summarizer => "summarizer",
            Deployment::Slides => "slides",
        }
    }
}

impl std::str::FromStr for Deployment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "summarizer" => Ok(Deployment::Summarizer),
            "slides" => Ok(Deployment::Slides),
            other => Err(format!("unknown deployment '{}'", other)),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Listen port. Falls back to the deployment's default when unset.
    pub port: Option<u16>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: None,
        }
    }
}

/// What to do when no credential is configured at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingKeyPolicy {
    /// Refuse to start; the listener is never bound.
    #[default]
    Strict,
    /// Warn and serve; upstream-bound requests answer 500.
    Lenient,
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Scheme and authority of the upstream API, without the `/v1` suffix.
    pub base_url: String,

    pub missing_key_policy: MissingKeyPolicy,

    /// Bearer credential. Only ever read from the environment.
    #[serde(skip)]
    pub api_key: Option<SecretString>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            missing_key_policy: MissingKeyPolicy::Strict,
            api_key: None,
        }
    }
}

/// Summarize endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SummarizeConfig {
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub n: u32,

    /// Minimum trimmed length of the article text, in characters.
    /// Values of 0 or 1 only reject empty text.
    pub min_text_chars: usize,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            system_prompt: "You are a helpful summarization assistant.".to_string(),
            max_tokens: 700,
            temperature: 0.2,
            n: 1,
            min_text_chars: 20,
        }
    }
}

/// Slide generation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SlidesConfig {
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for SlidesConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            system_prompt: "You are an expert presentation creator.".to_string(),
            max_tokens: 700,
            temperature: 0.7,
        }
    }
}

/// Image generation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageConfig {
    pub n: u32,
    pub size: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            n: 1,
            size: "512x512".to_string(),
        }
    }
}

/// Throttle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThrottleConfig {
    pub enabled: bool,

    /// Minimum spacing between consecutive summarize calls.
    pub min_interval_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_interval_ms: 200,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout in seconds. Unset means no timeout beyond
    /// what the transport imposes.
    pub request_secs: Option<u64>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Request hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
    /// Allow cross-origin requests from any origin.
    pub cors_enabled: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 8 * 1024 * 1024, // 8MB
            cors_enabled: true,
        }
    }
}

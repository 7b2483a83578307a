//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use secrecy::SecretString;
use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the upstream bearer credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable overriding the listen port.
pub const PORT_VAR: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid {var}: {reason}")]
    Env { var: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    let config: GatewayConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay `OPENAI_API_KEY` and `PORT` from the process environment.
pub fn apply_env(config: &mut GatewayConfig) -> Result<(), ConfigError> {
    apply_env_from(config, |key| std::env::var(key).ok())
}

/// Overlay environment values using the given lookup.
///
/// An empty credential counts as absent.
pub fn apply_env_from<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(API_KEY_VAR).filter(|k| !k.trim().is_empty()) {
        config.upstream.api_key = Some(SecretString::new(key));
    }

    if let Some(port) = lookup(PORT_VAR) {
        let port = port.trim().parse::<u16>().map_err(|e| ConfigError::Env {
            var: PORT_VAR,
            reason: e.to_string(),
        })?;
        config.listener.port = Some(port);
    }

    Ok(())
}

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs: parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → environment overlay: OPENAI_API_KEY, PORT (loader.rs)
//!     → CLI overrides (main.rs)
//!     → GatewayConfig (immutable)
//!     → shared via Arc to handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - The credential only comes from the environment and is held as a secret
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env, load_config, ConfigError};
pub use schema::{
    Deployment, GatewayConfig, ImageConfig, ListenerConfig, MissingKeyPolicy, ObservabilityConfig,
    SecurityConfig, SlidesConfig, SummarizeConfig, ThrottleConfig, TimeoutConfig, UpstreamConfig,
};

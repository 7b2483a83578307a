//! Generative AI gateway library.
//!
//! Forwards summarize, slide, and image requests to an OpenAI-compatible
//! upstream with a server-held credential.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod prompt;
pub mod security;
pub mod upstream;

pub use config::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;

//! Upstream API subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → types.rs (typed request body)
//!     → client.rs (POST with bearer credential, one attempt)
//!     → UpstreamReply (status + raw body)
//!     → types.rs (summary extraction) or raw relay
//! ```

pub mod client;
pub mod types;

pub use client::{Endpoint, UpstreamClient, UpstreamError, UpstreamReply};
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ImageGenerationRequest};

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, limits)
//!     → handlers.rs (throttle, validate, build prompt)
//!     → upstream client (one outbound call)
//!     → handlers.rs (extract summary or relay raw JSON)
//!     → error.rs (failure envelope)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, GatewayServer};

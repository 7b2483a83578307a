//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (body size cap, CORS)
//!     → throttle.rs (fixed spacing before summarize calls)
//!     → handler
//! ```
//!
//! # Design Decisions
//! - One process-wide throttle, passed explicitly through handler state
//! - The upstream credential is a single static secret; callers are not
//!   authenticated

pub mod limits;
pub mod throttle;

pub use throttle::Throttle;

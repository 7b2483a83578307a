//! Prompt assembly.
//!
//! # Data Flow
//! ```text
//! request selectors (length, style, language)
//!     → selector.rs (any JSON value rendered as text)
//!     → summarize.rs / slides.rs (instruction text)
//!     → source text appended verbatim
//!     → user message for chat completions
//! ```
//!
//! Source text is interpolated as-is: no escaping, truncation, or
//! prompt-injection filtering.

pub mod selector;
pub mod slides;
pub mod summarize;

pub use summarize::{Style, TextRejection};

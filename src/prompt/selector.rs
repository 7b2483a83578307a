//! Free-form request selectors rendered into prompt text.

use serde_json::Value;

/// Text for a selector as it appears inside a prompt.
///
/// Strings are used as-is, `null` becomes `"null"` and other values their JSON
/// text. A field the caller left out falls back to `default`.
pub fn render(value: Option<&Value>, default: &str) -> String {
    match value {
        None => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

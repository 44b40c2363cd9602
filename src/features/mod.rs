//! Uncertainty signals extracted from raw completion payloads.
//!
//! Extractors are total: a payload missing the fields they look for yields the
//! documented default rather than an error.

pub mod entropy;
pub mod tool_intent;

pub use entropy::mean_token_entropy;
pub use tool_intent::{has_tool_intent, TOOL_INDICATORS};

use serde_json::Value;

/// Generated text of the first choice, or an empty string.
pub fn completion_text(raw: &Value) -> String {
    raw.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

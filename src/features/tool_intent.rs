//! Tool-invocation detection.

use serde_json::Value;

/// Message fields that mark a tool or function call across providers.
pub const TOOL_INDICATORS: &[&str] = &["tool_calls", "function_call", "tool_use"];

/// True if `choices[0].message` carries any non-null tool indicator.
///
/// Malformed or empty responses yield `false`.
pub fn has_tool_intent(raw: &Value) -> bool {
    let Some(message) = raw.pointer("/choices/0/message") else {
        return false;
    };
    TOOL_INDICATORS
        .iter()
        .any(|key| message.get(*key).is_some_and(|v| !v.is_null()))
}

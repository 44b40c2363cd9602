//! Field helpers for structured logging

const PREVIEW_CHARS: usize = 100;

/// Prompt preview for log events (privacy-safe)
///
/// Returns `None` when content logging is disabled or the prompt is empty.
/// Otherwise returns the first ~100 characters, cut on a char boundary.
///
/// # Examples
///
/// ```
/// use vigil::logging::truncate_prompt;
///
/// assert_eq!(truncate_prompt("Hello, world!", false), None);
/// assert_eq!(truncate_prompt("Hello, world!", true).as_deref(), Some("Hello, world!"));
/// ```
pub fn truncate_prompt(prompt: &str, enable_content_logging: bool) -> Option<String> {
    if !enable_content_logging || prompt.is_empty() {
        return None;
    }
    Some(truncate_string(prompt, PREVIEW_CHARS))
}

fn truncate_string(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &s[..end]),
        None => s.to_string(),
    }
}

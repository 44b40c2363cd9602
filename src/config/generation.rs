//! Generation parameters

use serde::{Deserialize, Serialize};

/// Model used when none is configured or the configured one is unknown.
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";

/// Models the evaluation harness has been calibrated against.
pub const KNOWN_MODELS: &[&str] = &[
    "gpt-4.1-nano",
    "gpt-4o-mini",
    "claude-3-haiku-20240307",
    "gemini-2.0-flash",
];

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Send a deterministic prompt cache key derived from model, seed and prompt.
    pub cache_key: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.8,
            max_tokens: 1000,
            seed: None,
            cache_key: false,
        }
    }
}

/// Map a requested model id onto one the harness knows.
///
/// Unknown ids fall back to [`DEFAULT_MODEL`] with a warning.
pub fn resolve_model(requested: &str) -> String {
    if KNOWN_MODELS.contains(&requested) {
        return requested.to_string();
    }
    tracing::warn!(
        requested,
        fallback = DEFAULT_MODEL,
        "Unknown model, using default"
    );
    DEFAULT_MODEL.to_string()
}

//! Execution loop limits

use serde::{Deserialize, Serialize};

/// Hard ceiling applied to any configured prompt limit.
pub const MAX_PROMPT_LIMIT: usize = 1000;

/// Rate limit and budget settings for a run.
///
/// # Example
///
/// ```toml
/// [runner]
/// prompt_limit = 50
/// min_interval_ms = 1500
/// call_budget = 50
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Number of prompts to process; clamped to [`MAX_PROMPT_LIMIT`].
    pub prompt_limit: usize,

    /// Minimum delay between consecutive generation calls.
    pub min_interval_ms: u64,

    /// Maximum number of generation calls for the whole run.
    pub call_budget: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            prompt_limit: 100,
            min_interval_ms: 1000,
            call_budget: 100,
        }
    }
}

impl RunnerConfig {
    /// The prompt limit after applying the safety ceiling.
    pub fn effective_prompt_limit(&self) -> usize {
        self.prompt_limit.min(MAX_PROMPT_LIMIT)
    }
}

//! Generation provider configuration

use serde::{Deserialize, Serialize};

/// Connection settings for the OpenAI-compatible generation endpoint.
///
/// # Example
///
/// ```toml
/// [provider]
/// base_url = "https://api.us-east-1.langdb.ai"
/// api_key_env = "LANGDB_API_KEY"
/// project_id_env = "LANGDB_PROJECT_ID"
/// top_logprobs = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,

    /// Environment variable holding the bearer token.
    pub api_key_env: String,

    /// Environment variable holding the project id sent as `x-project-id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id_env: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Alternatives requested per token alongside its log-probability.
    pub top_logprobs: u8,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.us-east-1.langdb.ai".to_string(),
            api_key_env: "LANGDB_API_KEY".to_string(),
            project_id_env: Some("LANGDB_PROJECT_ID".to_string()),
            timeout_secs: 120,
            top_logprobs: 5,
        }
    }
}

impl ProviderConfig {
    /// Resolve the API key from the environment. Empty values count as unset.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|v| !v.is_empty())
    }

    /// Resolve the project id from the environment, if configured.
    pub fn project_id(&self) -> Option<String> {
        self.project_id_env
            .as_ref()
            .and_then(|name| std::env::var(name).ok())
            .filter(|v| !v.is_empty())
    }
}

//! OpenAI-compatible agent implementation.

use super::{AgentError, ChatCompletionRequest, GenerationAgent};
use crate::config::ProviderConfig;
use crate::generation::GenerationRequest;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// OpenAI-compatible agent.
///
/// Sends chat completions to `{base_url}/chat/completions` with:
/// - Bearer authentication when an API key is configured
/// - `x-project-id` for gateways that scope keys per project
/// - `x-seed` / `x-prompt-cache-key` when the request carries them
pub struct OpenAIAgent {
    /// Agent ID used in logs
    id: String,
    /// Base URL (e.g., "https://api.us-east-1.langdb.ai")
    base_url: String,
    /// API key for Bearer authentication
    api_key: Option<String>,
    /// Project header value
    project_id: Option<String>,
    /// Alternatives requested per token
    top_logprobs: u8,
    /// Request deadline
    timeout: Duration,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
}

impl OpenAIAgent {
    pub fn new(id: String, base_url: String, client: Arc<Client>) -> Self {
        Self {
            id,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            project_id: None,
            top_logprobs: 5,
            timeout: Duration::from_secs(120),
            client,
        }
    }

    /// Build an agent from provider configuration, resolving secrets from the environment.
    pub fn from_config(config: &ProviderConfig, client: Arc<Client>) -> Self {
        let api_key = config.api_key();
        if api_key.is_none() {
            tracing::warn!(
                env = %config.api_key_env,
                "Provider API key not set, sending unauthenticated requests"
            );
        }
        Self::new("openai-compatible".to_string(), config.base_url.clone(), client)
            .with_api_key(api_key)
            .with_project_id(config.project_id())
            .with_top_logprobs(config.top_logprobs)
            .with_timeout(Duration::from_secs(config.timeout_secs))
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_project_id(mut self, project_id: Option<String>) -> Self {
        self.project_id = project_id;
        self
    }

    pub fn with_top_logprobs(mut self, top_logprobs: u8) -> Self {
        self.top_logprobs = top_logprobs;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl GenerationAgent for OpenAIAgent {
    fn id(&self) -> &str {
        &self.id
    }

    async fn chat_completion(
        &self,
        request: &GenerationRequest,
    ) -> Result<serde_json::Value, AgentError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = ChatCompletionRequest {
            model: request.model(),
            messages: request.messages(),
            temperature: request.temperature(),
            max_tokens: request.max_tokens(),
            logprobs: true,
            top_logprobs: self.top_logprobs,
            seed: request.seed(),
            stream: false,
        };

        let mut builder = self.client.post(&url).json(&body).timeout(self.timeout);
        if let Some(ref key) = self.api_key {
            builder = builder.header("authorization", format!("Bearer {}", key));
        }
        if let Some(ref project_id) = self.project_id {
            builder = builder.header("x-project-id", project_id);
        }
        if let Some(seed) = request.seed() {
            builder = builder.header("x-seed", seed.to_string());
        }
        if let Some(cache_key) = request.cache_key() {
            builder = builder.header("x-prompt-cache-key", cache_key);
        }

        let timeout_ms = self.timeout.as_millis() as u64;
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AgentError::Timeout(timeout_ms)
            } else {
                AgentError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            if status.as_u16() == 429 {
                return Err(AgentError::QuotaExceeded(error_body));
            }
            return Err(AgentError::Upstream {
                status: status.as_u16(),
                message: error_body,
            });
        }

        response.json().await.map_err(|e| {
            AgentError::InvalidResponse(format!("Failed to parse completion response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let agent = OpenAIAgent::new(
            "test".to_string(),
            "http://localhost:8080/".to_string(),
            Arc::new(Client::new()),
        );
        assert_eq!(agent.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_from_config_applies_provider_settings() {
        let config = ProviderConfig {
            base_url: "http://gateway.local".to_string(),
            api_key_env: "VIGIL_TEST_OPENAI_AGENT_KEY".to_string(),
            project_id_env: None,
            timeout_secs: 9,
            top_logprobs: 3,
        };
        std::env::set_var("VIGIL_TEST_OPENAI_AGENT_KEY", "sk-abc");
        let agent = OpenAIAgent::from_config(&config, Arc::new(Client::new()));
        std::env::remove_var("VIGIL_TEST_OPENAI_AGENT_KEY");

        assert_eq!(agent.api_key.as_deref(), Some("sk-abc"));
        assert!(agent.project_id.is_none());
        assert_eq!(agent.top_logprobs, 3);
        assert_eq!(agent.timeout, Duration::from_secs(9));
        assert_eq!(agent.id(), "openai-compatible");
    }
}

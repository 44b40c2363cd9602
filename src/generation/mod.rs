//! Generation adapter
//!
//! Wraps a single remote completion call and normalizes the provider payload
//! into a [`GenerationResult`] carrying the extracted uncertainty signals.

use crate::agent::{AgentError, ChatMessage, GenerationAgent};
use crate::features::{completion_text, has_tool_intent, mean_token_entropy};
use std::sync::Arc;
use tokio::time::Instant;

/// Parameters for one completion call. Built once, then read-only.
///
/// # Example
///
/// ```
/// use vigil::agent::ChatMessage;
/// use vigil::generation::GenerationRequest;
///
/// let request = GenerationRequest::new("gpt-4.1-nano", vec![ChatMessage::user("2+2=?")])
///     .with_temperature(0.2)
///     .with_seed(Some(7));
/// assert_eq!(request.seed(), Some(7));
/// assert_eq!(request.max_tokens(), 1000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    seed: Option<u64>,
    cache_key: Option<String>,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: 0.8,
            max_tokens: 1000,
            seed: None,
            cache_key: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_cache_key(mut self, cache_key: Option<String>) -> Self {
        self.cache_key = cache_key;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn cache_key(&self) -> Option<&str> {
        self.cache_key.as_deref()
    }
}

/// Deterministic prompt cache key for a (model, seed, prompt) triple.
pub fn prompt_cache_key(model: &str, seed: Option<u64>, prompt: &str) -> String {
    let seed = seed.map(|s| s.to_string()).unwrap_or_default();
    let name = format!("{}\u{1f}{}\u{1f}{}", model, seed, prompt);
    uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

/// Canonical output of one successful generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    /// First choice content; empty when the provider returned none
    pub text: String,
    /// Provider payload as received
    pub raw: serde_json::Value,
    /// Mean token entropy; `None` when no log-probabilities came back
    pub entropy: Option<f64>,
    pub tool_flag: bool,
    /// Messages that were sent, kept for validators that need the prompt
    pub messages: Vec<ChatMessage>,
    /// Wall-clock seconds spent in the call
    pub latency: f64,
}

impl GenerationResult {
    /// Build a result from a raw payload, running all feature extractors.
    pub fn from_raw(raw: serde_json::Value, messages: Vec<ChatMessage>, latency: f64) -> Self {
        Self {
            text: completion_text(&raw),
            entropy: mean_token_entropy(&raw),
            tool_flag: has_tool_intent(&raw),
            raw,
            messages,
            latency,
        }
    }

    /// Content of the first prompt message, or `""`.
    pub fn prompt(&self) -> &str {
        self.messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }
}

/// Issues exactly one agent call per [`generate`](Self::generate).
#[derive(Clone)]
pub struct GenerationAdapter {
    agent: Arc<dyn GenerationAgent>,
}

impl GenerationAdapter {
    pub fn new(agent: Arc<dyn GenerationAgent>) -> Self {
        Self { agent }
    }

    pub fn agent_id(&self) -> &str {
        self.agent.id()
    }

    /// Call the provider and attach features. Agent errors propagate unchanged.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, AgentError> {
        let start = Instant::now();
        let raw = self.agent.chat_completion(request).await?;
        let latency = start.elapsed().as_secs_f64();

        let result = GenerationResult::from_raw(raw, request.messages().to_vec(), latency);
        tracing::debug!(
            agent = self.agent.id(),
            model = request.model(),
            entropy = ?result.entropy,
            tool_flag = result.tool_flag,
            text_len = result.text.len(),
            latency_ms = (latency * 1000.0) as u64,
            "Generation completed"
        );
        Ok(result)
    }
}

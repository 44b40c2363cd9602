//! Generation agent abstraction.
//!
//! This module provides the `GenerationAgent` trait that hides the provider's
//! HTTP protocol behind a single completion call, plus the OpenAI-compatible
//! implementation used against LangDB and similar gateways.

use async_trait::async_trait;

pub mod error;
pub mod openai;
pub mod types;

pub use error::AgentError;
pub use openai::OpenAIAgent;
pub use types::{ChatCompletionRequest, ChatMessage};

use crate::generation::GenerationRequest;

/// Remote generation capability.
///
/// The response is returned as an opaque JSON payload; feature extractors
/// read what they need from it and tolerate anything missing.
///
/// # Object Safety
///
/// This trait is object-safe and designed to be used as `Arc<dyn GenerationAgent>`.
#[async_trait]
pub trait GenerationAgent: Send + Sync + 'static {
    /// Identifier used in logs (e.g., "langdb").
    fn id(&self) -> &str;

    /// Execute one non-streaming chat completion.
    ///
    /// # Returns
    ///
    /// - `Ok(Value)` with the provider's raw response body
    /// - `Err(AgentError::QuotaExceeded)` if the provider reported a quota or rate limit
    /// - `Err(AgentError::Upstream)` for any other 4xx/5xx
    /// - `Err(AgentError::Network)` / `Err(AgentError::Timeout)` on transport failures
    /// - `Err(AgentError::InvalidResponse)` if the body is not JSON
    async fn chat_completion(
        &self,
        request: &GenerationRequest,
    ) -> Result<serde_json::Value, AgentError>;
}

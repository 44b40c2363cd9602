//! Wire types for the OpenAI-compatible chat completion endpoint.

use serde::{Deserialize, Serialize};

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}

/// Chat completion request body.
///
/// Log-probabilities are always requested so that token entropy can be
/// computed from the response.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
    pub max_tokens: u32,
    pub logprobs: bool,
    pub top_logprobs: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub stream: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_logprob_fields() {
        let messages = vec![ChatMessage::user("2+2=?")];
        let request = ChatCompletionRequest {
            model: "gpt-4.1-nano",
            messages: &messages,
            temperature: 0.5,
            max_tokens: 16,
            logprobs: true,
            top_logprobs: 5,
            seed: None,
            stream: false,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "gpt-4.1-nano",
                "messages": [{"role": "user", "content": "2+2=?"}],
                "temperature": 0.5,
                "max_tokens": 16,
                "logprobs": true,
                "top_logprobs": 5,
                "stream": false
            })
        );
    }

    #[test]
    fn test_request_includes_seed_when_set() {
        let messages = vec![ChatMessage::user("hi")];
        let request = ChatCompletionRequest {
            model: "m",
            messages: &messages,
            temperature: 0.0,
            max_tokens: 1,
            logprobs: true,
            top_logprobs: 1,
            seed: Some(7),
            stream: false,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["seed"], 7);
    }
}

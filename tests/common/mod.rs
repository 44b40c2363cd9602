//! Shared test utilities for Vigil integration tests.
//!
//! Scripted generation agents, fixed classifiers and response builders.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vigil::agent::{AgentError, GenerationAgent};
use vigil::generation::{GenerationAdapter, GenerationRequest};
use vigil::pipeline::{RunConfig, Runner};
use vigil::config::StrategyConfig;
use vigil::validation::{Classification, ClassifierError, TextClassifier};

// =============================================================================
// Response Builders
// =============================================================================

/// Chat completion body carrying one logprob entry per value.
pub fn completion(text: &str, logprobs: &[f64]) -> Value {
    let content: Vec<Value> = logprobs
        .iter()
        .enumerate()
        .map(|(i, lp)| json!({"token": format!("t{}", i), "logprob": lp, "top_logprobs": []}))
        .collect();
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "logprobs": {"content": content},
            "finish_reason": "stop"
        }]
    })
}

/// Chat completion body without logprob data.
pub fn completion_without_logprobs(text: &str) -> Value {
    json!({
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
}

/// Logprob whose single-token entropy `-p·ln(p)` is low (~0.09).
pub const CONFIDENT_LOGPROB: f64 = -0.1;

/// Logprob whose single-token entropy is `1/e` (~0.368), the maximum.
pub const UNCERTAIN_LOGPROB: f64 = -1.0;

// =============================================================================
// Agents
// =============================================================================

/// Agent that replays a script of outcomes, then answers confidently.
pub struct ScriptedAgent {
    script: Mutex<VecDeque<Result<Value, AgentError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    delay: Duration,
}

impl ScriptedAgent {
    pub fn new(script: Vec<Result<Value, AgentError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    /// Simulated network latency per call (uses tokio time).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationAgent for ScriptedAgent {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn chat_completion(&self, request: &GenerationRequest) -> Result<Value, AgentError> {
        self.requests.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(completion("ok", &[CONFIDENT_LOGPROB])))
    }
}

/// Deterministic agent: answer and logprobs derived from the prompt text.
pub struct EchoAgent;

#[async_trait]
impl GenerationAgent for EchoAgent {
    fn id(&self) -> &str {
        "echo"
    }

    async fn chat_completion(&self, request: &GenerationRequest) -> Result<Value, AgentError> {
        let prompt = request
            .messages()
            .first()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        let logprob = -(prompt.len() as f64 % 7.0) / 3.0;
        Ok(completion(&format!("answer to {}", prompt), &[logprob, CONFIDENT_LOGPROB]))
    }
}

// =============================================================================
// Classifiers
// =============================================================================

/// Classifier that always reports the same best label and counts its calls.
pub struct FixedClassifier {
    label: &'static str,
    score: f64,
    calls: Mutex<Vec<String>>,
}

impl FixedClassifier {
    pub fn new(label: &'static str, score: f64) -> Self {
        Self {
            label,
            score,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn inputs(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextClassifier for FixedClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        self.calls.lock().unwrap().push(text.to_string());
        Ok(Classification {
            label: self.label.to_string(),
            score: self.score,
        })
    }
}

// =============================================================================
// Runner Builders
// =============================================================================

/// Run parameters with no pacing and a generous budget.
pub fn run_config() -> RunConfig {
    RunConfig {
        seed: Some(42),
        model: "gpt-4.1-nano".to_string(),
        strategies: vec![],
        prompt_limit: 100,
        min_interval: Duration::ZERO,
        call_budget: 100,
        temperature: 0.8,
        max_tokens: 1000,
        cache_key: false,
    }
}

/// High-entropy check at `threshold` followed by the terminal direct response.
pub fn entropy_chain(threshold: f64) -> Vec<StrategyConfig> {
    vec![
        StrategyConfig::HighEntropy {
            threshold,
            fallback_model: None,
        },
        StrategyConfig::DirectResponse,
    ]
}

pub fn runner_with(
    agent: Arc<dyn GenerationAgent>,
    strategies: Vec<StrategyConfig>,
    mut config: RunConfig,
) -> Runner {
    config.strategies = strategies;
    Runner::new(GenerationAdapter::new(agent), config)
}

pub fn prompts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

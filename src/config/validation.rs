//! Validator configuration

use serde::{Deserialize, Serialize};

const HOSTED_INFERENCE_URL: &str = "https://api-inference.huggingface.co";
const HOSTED_TOKEN_ENV: &str = "HF_API_TOKEN";

/// Hosted text-classification endpoint resolved from a validator section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierEndpoint {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

fn endpoint(
    base_url: &str,
    model: &str,
    api_key_env: &str,
    timeout_secs: u64,
) -> ClassifierEndpoint {
    ClassifierEndpoint {
        base_url: base_url.to_string(),
        model: model.to_string(),
        api_key: std::env::var(api_key_env).ok().filter(|v| !v.is_empty()),
        timeout_secs,
    }
}

/// Contradiction (NLI) validator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NliConfig {
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for NliConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: HOSTED_INFERENCE_URL.to_string(),
            model: "MoritzLaurer/DeBERTa-v3-large-mnli-fever-anli-ling-wanli".to_string(),
            api_key_env: HOSTED_TOKEN_ENV.to_string(),
            timeout_secs: 30,
        }
    }
}

impl NliConfig {
    pub fn endpoint(&self) -> ClassifierEndpoint {
        endpoint(&self.base_url, &self.model, &self.api_key_env, self.timeout_secs)
    }
}

/// Factuality validator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FactualityConfig {
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    pub timeout_secs: u64,
    /// Label the classifier uses for "answer is consistent with the prompt"
    pub consistent_label: String,
    /// Minimum consistency score for `factual_flag = true`
    pub threshold: f64,
}

impl Default for FactualityConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: HOSTED_INFERENCE_URL.to_string(),
            model: "vectara/hallucination_evaluation_model".to_string(),
            api_key_env: HOSTED_TOKEN_ENV.to_string(),
            timeout_secs: 30,
            consistent_label: "consistent".to_string(),
            threshold: 0.5,
        }
    }
}

impl FactualityConfig {
    pub fn endpoint(&self) -> ClassifierEndpoint {
        endpoint(&self.base_url, &self.model, &self.api_key_env, self.timeout_secs)
    }
}

/// Validators run on the fallback path, contradiction first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub nli: NliConfig,
    pub factuality: FactualityConfig,
}

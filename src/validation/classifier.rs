//! Text classification capability used by the validators.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::ClassifierEndpoint;

/// Best label reported for one input, lower-cased.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub score: f64,
}

/// Errors from a classification call.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("Classifier error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Single-input text classifier returning its best label.
#[async_trait]
pub trait TextClassifier: Send + Sync + 'static {
    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError>;
}

/// Classifier served by a Hugging Face style inference endpoint:
/// `POST {base_url}/models/{model}` with `{"inputs": text}`.
pub struct HostedClassifier {
    url: String,
    api_key: Option<String>,
    timeout: Duration,
    client: Arc<Client>,
}

#[derive(Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

impl HostedClassifier {
    pub fn new(endpoint: &ClassifierEndpoint, client: Arc<Client>) -> Self {
        Self {
            url: format!(
                "{}/models/{}",
                endpoint.base_url.trim_end_matches('/'),
                endpoint.model
            ),
            api_key: endpoint.api_key.clone(),
            timeout: Duration::from_secs(endpoint.timeout_secs),
            client,
        }
    }

    /// Pick the highest-scoring entry from `[{label, score}, ...]` or the
    /// batched form `[[{label, score}, ...]]`.
    fn best_label(body: Value) -> Result<Classification, ClassifierError> {
        let entries = match body {
            Value::Array(items) if matches!(items.first(), Some(Value::Array(_))) => {
                items.into_iter().next().unwrap_or_default()
            }
            Value::Array(items) => Value::Array(items),
            Value::Object(map) => Value::Array(vec![Value::Object(map)]),
            other => {
                return Err(ClassifierError::InvalidResponse(format!(
                    "expected a list of label scores, got {}",
                    other
                )))
            }
        };

        let entries: Vec<LabelScore> = serde_json::from_value(entries)
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

        // JSON numbers are finite; rounding can still push a probability
        // slightly outside [0, 1].
        entries
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|best| Classification {
                label: best.label.to_lowercase(),
                score: best.score.clamp(0.0, 1.0),
            })
            .ok_or_else(|| ClassifierError::InvalidResponse("empty label list".to_string()))
    }
}

#[async_trait]
impl TextClassifier for HostedClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        let mut builder = self
            .client
            .post(&self.url)
            .json(&json!({ "inputs": text }))
            .timeout(self.timeout);
        if let Some(ref key) = self.api_key {
            builder = builder.header("authorization", format!("Bearer {}", key));
        }

        let timeout_ms = self.timeout.as_millis() as u64;
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout(timeout_ms)
            } else {
                ClassifierError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClassifierError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;
        Self::best_label(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_label_from_flat_list() {
        let body = json!([
            {"label": "ENTAILMENT", "score": 0.1},
            {"label": "CONTRADICTION", "score": 0.7},
            {"label": "NEUTRAL", "score": 0.2}
        ]);
        let best = HostedClassifier::best_label(body).unwrap();
        assert_eq!(best.label, "contradiction");
        assert_eq!(best.score, 0.7);
    }

    #[test]
    fn best_label_from_batched_list() {
        let body = json!([[{"label": "neutral", "score": 0.55}, {"label": "entailment", "score": 0.45}]]);
        let best = HostedClassifier::best_label(body).unwrap();
        assert_eq!(best.label, "neutral");
    }

    #[test]
    fn best_label_from_single_object() {
        let body = json!({"label": "entailment", "score": 0.99});
        let best = HostedClassifier::best_label(body).unwrap();
        assert_eq!(best.label, "entailment");
    }

    #[test]
    fn best_label_rejects_empty_and_malformed() {
        assert!(HostedClassifier::best_label(json!([])).is_err());
        assert!(HostedClassifier::best_label(json!("loading")).is_err());
        assert!(HostedClassifier::best_label(json!([{"label": "x"}])).is_err());
    }

    #[test]
    fn best_label_clamps_score_into_unit_range() {
        let body = json!([{"label": "CONTRADICTION", "score": 1.0000002}, {"label": "neutral", "score": -0.1}]);
        let best = HostedClassifier::best_label(body).unwrap();
        assert_eq!(best.label, "contradiction");
        assert_eq!(best.score, 1.0);
    }

    #[test]
    fn best_label_rejects_missing_or_non_numeric_score() {
        for body in [
            json!([{"label": "entailment", "score": null}]),
            json!([{"label": "entailment", "score": "NaN"}]),
        ] {
            assert!(matches!(
                HostedClassifier::best_label(body),
                Err(ClassifierError::InvalidResponse(_))
            ));
        }
    }

    #[test]
    fn url_joins_model_path() {
        let endpoint = ClassifierEndpoint {
            base_url: "http://localhost:9000/".to_string(),
            model: "org/nli".to_string(),
            api_key: None,
            timeout_secs: 1,
        };
        let classifier = HostedClassifier::new(&endpoint, Arc::new(Client::new()));
        assert_eq!(classifier.url, "http://localhost:9000/models/org/nli");
    }
}

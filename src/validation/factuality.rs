//! Factual-consistency check run after the contradiction validator.

use async_trait::async_trait;
use std::sync::Arc;

use super::{TextClassifier, ValidationVerdict, Validator};
use crate::generation::GenerationResult;

/// Scores how consistent the answer is with the prompt using a
/// hallucination-detection classifier.
///
/// `factual_score` is the probability of `consistent_label`: the reported
/// score when that label wins, `1 - score` otherwise.
pub struct FactualityValidator {
    classifier: Arc<dyn TextClassifier>,
    consistent_label: String,
    threshold: f64,
}

impl FactualityValidator {
    pub fn new(classifier: Arc<dyn TextClassifier>, consistent_label: &str, threshold: f64) -> Self {
        Self {
            classifier,
            consistent_label: consistent_label.to_lowercase(),
            threshold,
        }
    }
}

#[async_trait]
impl Validator for FactualityValidator {
    fn name(&self) -> &'static str {
        "factuality"
    }

    async fn validate(&self, result: &GenerationResult, verdict: &mut ValidationVerdict) {
        let premise = result.prompt();
        if premise.is_empty() || result.text.is_empty() {
            return;
        }

        let pair = format!("{} [SEP] {}", premise, result.text);
        match self.classifier.classify(&pair).await {
            Ok(classification) => {
                let score = if classification.label == self.consistent_label {
                    classification.score
                } else {
                    1.0 - classification.score
                };
                let score = score.clamp(0.0, 1.0);
                verdict.factual_score = Some(score);
                verdict.factual_flag = Some(score >= self.threshold);
                tracing::debug!(
                    score,
                    contradiction = verdict.contradiction_flag,
                    "Factuality check completed"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Factuality classification failed");
            }
        }
    }
}

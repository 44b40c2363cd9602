//! NLI contradiction check between the prompt and the generated answer.

use async_trait::async_trait;
use std::sync::Arc;

use super::{Classification, NliLabel, NliScores, TextClassifier, ValidationVerdict, Validator};
use crate::generation::GenerationResult;

/// Classifies `"{premise} [SEP] {hypothesis}"` where the premise is the first
/// prompt message and the hypothesis is the generated text.
///
/// The classifier reports only its best label, so the mapping holds that
/// label's score and 0.0 for the other two. This is a single-label
/// approximation of the full NLI distribution.
pub struct ContradictionValidator {
    classifier: Arc<dyn TextClassifier>,
}

impl ContradictionValidator {
    pub fn new(classifier: Arc<dyn TextClassifier>) -> Self {
        Self { classifier }
    }
}

/// Expand a best-label classification into all three NLI labels.
pub fn scores_from(classification: &Classification) -> NliScores {
    let mut scores: NliScores = NliLabel::ALL.into_iter().map(|l| (l, 0.0)).collect();
    match NliLabel::parse(&classification.label) {
        Some(label) => {
            scores.insert(label, classification.score);
        }
        None => {
            tracing::debug!(label = %classification.label, "Ignoring unknown NLI label");
        }
    }
    scores
}

/// True iff contradiction strictly beats both entailment and neutral.
pub fn is_contradiction(scores: &NliScores) -> bool {
    let score = |label: NliLabel| scores.get(&label).copied().unwrap_or(0.0);
    let contradiction = score(NliLabel::Contradiction);
    contradiction > score(NliLabel::Entailment) && contradiction > score(NliLabel::Neutral)
}

#[async_trait]
impl Validator for ContradictionValidator {
    fn name(&self) -> &'static str {
        "contradiction"
    }

    async fn validate(&self, result: &GenerationResult, verdict: &mut ValidationVerdict) {
        let premise = result.prompt();
        let hypothesis = result.text.as_str();
        if premise.is_empty() || hypothesis.is_empty() {
            tracing::debug!("Empty premise or hypothesis, skipping NLI");
            return;
        }

        let pair = format!("{} [SEP] {}", premise, hypothesis);
        match self.classifier.classify(&pair).await {
            Ok(classification) => {
                let scores = scores_from(&classification);
                verdict.contradiction_flag = is_contradiction(&scores);
                verdict.nli_scores = scores;
                tracing::debug!(
                    label = %classification.label,
                    score = classification.score,
                    contradiction = verdict.contradiction_flag,
                    "NLI classification completed"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "NLI classification failed, treating as no contradiction");
            }
        }
    }
}

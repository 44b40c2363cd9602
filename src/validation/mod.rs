//! Fallback-path validators
//!
//! Validators run only when the strategy chain routes a response to fallback
//! validation. They share one [`ValidationVerdict`], filled in registration
//! order (contradiction first), so later validators can read earlier output.
//! A validator never fails: degenerate input or an unavailable classifier
//! leaves its part of the verdict at the default.

pub mod classifier;
pub mod contradiction;
pub mod factuality;

pub use classifier::{Classification, ClassifierError, HostedClassifier, TextClassifier};
pub use contradiction::ContradictionValidator;
pub use factuality::FactualityValidator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::generation::GenerationResult;

/// Fixed NLI label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NliLabel {
    Entailment,
    Neutral,
    Contradiction,
}

impl NliLabel {
    pub const ALL: [NliLabel; 3] = [NliLabel::Entailment, NliLabel::Neutral, NliLabel::Contradiction];

    /// Parse a classifier label, case-insensitively.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "entailment" => Some(NliLabel::Entailment),
            "neutral" => Some(NliLabel::Neutral),
            "contradiction" => Some(NliLabel::Contradiction),
            _ => None,
        }
    }
}

/// Label → score mapping. Either empty (no validation ran) or holding all three labels.
pub type NliScores = BTreeMap<NliLabel, f64>;

/// Accumulated output of the validators for one response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationVerdict {
    pub contradiction_flag: bool,
    pub nli_scores: NliScores,
    pub factual_flag: Option<bool>,
    pub factual_score: Option<f64>,
}

/// One stage of the fallback validation path.
#[async_trait]
pub trait Validator: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &'static str;

    /// Inspect `result` and record findings into `verdict`.
    async fn validate(&self, result: &GenerationResult, verdict: &mut ValidationVerdict);
}

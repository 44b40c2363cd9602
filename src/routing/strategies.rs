//! Built-in routing strategies

use super::{RoutingDecision, Strategy};
use crate::generation::GenerationResult;

/// Routes to fallback validation when mean token entropy is strictly above
/// `threshold`. A response without entropy never fires.
#[derive(Debug, Clone, PartialEq)]
pub struct HighEntropyStrategy {
    threshold: f64,
    fallback_model: Option<String>,
}

impl HighEntropyStrategy {
    pub fn new(threshold: f64, fallback_model: Option<String>) -> Self {
        Self {
            threshold,
            fallback_model,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Strategy for HighEntropyStrategy {
    fn name(&self) -> &'static str {
        "high_entropy"
    }

    fn decide(&self, result: &GenerationResult) -> Option<RoutingDecision> {
        let entropy = result.entropy?;
        (entropy > self.threshold).then(|| RoutingDecision::fallback(self.fallback_model.clone()))
    }
}

/// Explicit terminal marker; never fires, leaving the scheduler default in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectResponseStrategy;

impl Strategy for DirectResponseStrategy {
    fn name(&self) -> &'static str {
        "direct_response"
    }

    fn decide(&self, _result: &GenerationResult) -> Option<RoutingDecision> {
        None
    }
}

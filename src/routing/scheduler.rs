//! Strategy chain and validator dispatch

use tokio::time::Instant;

use super::{RoutingDecision, Strategy};
use crate::generation::GenerationResult;
use crate::validation::{ValidationVerdict, Validator};

/// Decision plus whatever the validators produced for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingOutcome {
    pub decision: RoutingDecision,
    pub verdict: ValidationVerdict,
    /// Whether the validator chain ran
    pub validated: bool,
}

/// Composes the ordered strategy chain with the fallback validators.
///
/// Deciding is local and cheap; validation may call remote classifiers, so
/// validators only run when the winning decision is fallback validation.
pub struct Scheduler {
    strategies: Vec<Box<dyn Strategy>>,
    validators: Vec<Box<dyn Validator>>,
}

impl Scheduler {
    /// Create a scheduler over `strategies`, evaluated in the order provided.
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self {
            strategies,
            validators: Vec::new(),
        }
    }

    /// Append a validator. Validators run in registration order, so the
    /// contradiction validator must be registered first.
    pub fn with_validator(mut self, validator: Box<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    pub fn validator_names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// First decision emitted by the chain, or `DirectResponse` when none fires.
    pub fn route(&self, result: &GenerationResult) -> RoutingDecision {
        for strategy in &self.strategies {
            if let Some(decision) = strategy.decide(result) {
                tracing::trace!(
                    strategy = strategy.name(),
                    decision = %decision,
                    "Strategy fired"
                );
                return decision;
            }
        }
        RoutingDecision::default()
    }

    /// Route `result` and, on the fallback path, run every validator in order
    /// over a shared verdict.
    pub async fn dispatch(&self, result: &GenerationResult) -> RoutingOutcome {
        let decision = self.route(result);
        let mut verdict = ValidationVerdict::default();

        if !decision.is_fallback() {
            return RoutingOutcome {
                decision,
                verdict,
                validated: false,
            };
        }

        for validator in &self.validators {
            let start = Instant::now();
            validator.validate(result, &mut verdict).await;
            let elapsed = start.elapsed();

            metrics::histogram!(
                "vigil_validator_duration_seconds",
                "validator" => validator.name(),
            )
            .record(elapsed.as_secs_f64());

            tracing::trace!(
                validator = validator.name(),
                elapsed_us = elapsed.as_micros() as u64,
                contradiction = verdict.contradiction_flag,
                "Validator completed"
            );
        }

        RoutingOutcome {
            decision,
            verdict,
            validated: true,
        }
    }
}

//! Routing module
//!
//! Turns the features of a [`GenerationResult`] into a [`RoutingDecision`]
//! through an ordered chain of strategies, and dispatches fallback decisions
//! to the validators.

pub mod decision;
pub mod scheduler;
pub mod strategies;

pub use decision::RoutingDecision;
pub use scheduler::{RoutingOutcome, Scheduler};
pub use strategies::{DirectResponseStrategy, HighEntropyStrategy};

use crate::generation::GenerationResult;

/// A routing policy in the strategy chain.
///
/// Strategies are pure: they read already-extracted features and either emit
/// a decision or abstain with `None`.
pub trait Strategy: Send + Sync {
    /// Identifier for logging.
    fn name(&self) -> &'static str;

    /// Emit a decision for `result`, or `None` to defer to the next strategy.
    fn decide(&self, result: &GenerationResult) -> Option<RoutingDecision>;
}

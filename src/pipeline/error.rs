//! Run-aborting errors

use thiserror::Error;

/// Conditions that stop the whole run. Per-prompt failures are recorded
/// instead and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("Call budget of {budget} exhausted")]
    BudgetExhausted { budget: u32 },

    #[error("Provider quota exceeded: {0}")]
    QuotaExceeded(String),
}

//! Run-wide cap on remote generation calls

use std::sync::atomic::{AtomicU32, Ordering};

use super::PipelineError;

/// Hard ceiling on generation calls for one run.
///
/// Check-and-increment is a single atomic step, so the cap holds even if the
/// budget is shared between workers.
#[derive(Debug)]
pub struct CallBudget {
    limit: u32,
    used: AtomicU32,
}

impl CallBudget {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            used: AtomicU32::new(0),
        }
    }

    /// Reserve one call. Returns the 1-based call number.
    pub fn try_acquire(&self) -> Result<u32, PipelineError> {
        self.used
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |used| {
                (used < self.limit).then_some(used + 1)
            })
            .map(|previous| previous + 1)
            .map_err(|_| PipelineError::BudgetExhausted { budget: self.limit })
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn used(&self) -> u32 {
        self.used.load(Ordering::SeqCst)
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used())
    }
}

//! Fixed-interval pacing between generation calls

use std::time::Duration;

/// Sleeps a fixed `min_interval` before every call except the first.
///
/// The pause is not adjusted for how long the previous call took.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_interval: Duration,
    primed: bool,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            primed: false,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the next call may be issued.
    pub async fn wait(&mut self) {
        if self.primed && !self.min_interval.is_zero() {
            tracing::trace!(
                interval_ms = self.min_interval.as_millis() as u64,
                "Rate limit pause"
            );
            tokio::time::sleep(self.min_interval).await;
        }
        self.primed = true;
    }
}

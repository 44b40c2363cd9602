//! Error types for agent operations.

use thiserror::Error;

/// Errors that can occur during a generation call.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Provider refused the call because a quota or rate limit was hit (HTTP 429).
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Backend returned an error response (4xx, 5xx).
    #[error("Backend error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Backend response doesn't match expected format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Agent configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AgentError {
    /// Whether this error must stop the whole run rather than a single prompt.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, AgentError::QuotaExceeded(_))
    }
}

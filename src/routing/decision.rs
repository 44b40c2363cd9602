//! Routing decision types

use serde::{Serialize, Serializer};
use std::fmt;

/// Outcome of the strategy chain for one response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoutingDecision {
    /// Accept the response as-is
    #[default]
    DirectResponse,

    /// Send the response through the validators
    FallbackValidation {
        /// Model designated for a follow-up pass, if configured
        fallback_model: Option<String>,
    },

    /// Generation failed for this prompt; assigned by the runner only
    Error,
}

impl RoutingDecision {
    pub fn fallback(fallback_model: Option<String>) -> Self {
        RoutingDecision::FallbackValidation { fallback_model }
    }

    /// Column value used in records and metrics labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingDecision::DirectResponse => "direct_response",
            RoutingDecision::FallbackValidation { .. } => "fallback_validation",
            RoutingDecision::Error => "Error",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RoutingDecision::FallbackValidation { .. })
    }

    pub fn fallback_model(&self) -> Option<&str> {
        match self {
            RoutingDecision::FallbackValidation { fallback_model } => fallback_model.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for RoutingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RoutingDecision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

//! Routing strategy configuration

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::routing::{DirectResponseStrategy, HighEntropyStrategy, Strategy};

/// One entry of the ordered strategy chain.
///
/// ```toml
/// [[routing.strategies]]
/// kind = "high_entropy"
/// threshold = 0.5
/// fallback_model = "gpt-4o-mini"
///
/// [[routing.strategies]]
/// kind = "direct_response"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Route to validation when mean token entropy exceeds `threshold`
    HighEntropy {
        threshold: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback_model: Option<String>,
    },
    /// Explicit terminal marker; never fires
    DirectResponse,
}

impl From<&StrategyConfig> for Box<dyn Strategy> {
    fn from(config: &StrategyConfig) -> Self {
        match config {
            StrategyConfig::HighEntropy {
                threshold,
                fallback_model,
            } => Box::new(HighEntropyStrategy::new(*threshold, fallback_model.clone())),
            StrategyConfig::DirectResponse => Box::new(DirectResponseStrategy),
        }
    }
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub strategies: Vec<StrategyConfig>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            strategies: vec![
                StrategyConfig::HighEntropy {
                    threshold: 0.5,
                    fallback_model: None,
                },
                StrategyConfig::DirectResponse,
            ],
        }
    }
}

/// Reject thresholds that can never compare meaningfully against an entropy.
pub fn validate_strategies(strategies: &[StrategyConfig]) -> Result<(), ConfigError> {
    for (i, strategy) in strategies.iter().enumerate() {
        if let StrategyConfig::HighEntropy {
            threshold,
            fallback_model,
        } = strategy
        {
            if !threshold.is_finite() || *threshold < 0.0 {
                return Err(ConfigError::invalid(
                    format!("routing.strategies[{}].threshold", i),
                    format!("threshold must be a finite non-negative number, got {}", threshold),
                ));
            }
            if fallback_model.as_deref() == Some("") {
                return Err(ConfigError::invalid(
                    format!("routing.strategies[{}].fallback_model", i),
                    "fallback_model cannot be empty",
                ));
            }
        }
    }
    Ok(())
}

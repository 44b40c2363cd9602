//! Configuration module for Vigil
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`VIGIL_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use vigil::config::VigilConfig;
//!
//! let config = VigilConfig::default();
//! assert_eq!(config.generation.model, "gpt-4.1-nano");
//!
//! let toml = r#"
//! [runner]
//! call_budget = 10
//! "#;
//! let config: VigilConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.runner.call_budget, 10);
//! ```

pub mod error;
pub mod generation;
pub mod logging;
pub mod provider;
pub mod routing;
pub mod runner;
pub mod validation;

pub use error::ConfigError;
pub use generation::{resolve_model, GenerationConfig, DEFAULT_MODEL, KNOWN_MODELS};
pub use logging::{LogFormat, LoggingConfig};
pub use provider::ProviderConfig;
pub use routing::{RoutingConfig, StrategyConfig};
pub use runner::{RunnerConfig, MAX_PROMPT_LIMIT};
pub use validation::{ClassifierEndpoint, FactualityConfig, NliConfig, ValidationConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for an evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VigilConfig {
    /// Generation endpoint connection
    pub provider: ProviderConfig,
    /// Model and sampling parameters
    pub generation: GenerationConfig,
    /// Ordered strategy chain
    pub routing: RoutingConfig,
    /// Fallback-path validators
    pub validation: ValidationConfig,
    /// Rate limit, budget and prompt limit
    pub runner: RunnerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl VigilConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                    path: p.to_path_buf(),
                    source,
                })?;
                toml::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: p.to_path_buf(),
                    source,
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports VIGIL_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("VIGIL_MODEL") {
            self.generation.model = model;
        }
        if let Ok(seed) = std::env::var("VIGIL_SEED") {
            if let Ok(s) = seed.parse() {
                self.generation.seed = Some(s);
            }
        }
        if let Ok(url) = std::env::var("VIGIL_PROVIDER_URL") {
            self.provider.base_url = url;
        }

        // Runner limits
        if let Ok(limit) = std::env::var("VIGIL_PROMPT_LIMIT") {
            if let Ok(l) = limit.parse() {
                self.runner.prompt_limit = l;
            }
        }
        if let Ok(budget) = std::env::var("VIGIL_CALL_BUDGET") {
            if let Ok(b) = budget.parse() {
                self.runner.call_budget = b;
            }
        }
        if let Ok(interval) = std::env::var("VIGIL_MIN_INTERVAL_MS") {
            if let Ok(i) = interval.parse() {
                self.runner.min_interval_ms = i;
            }
        }

        if let Ok(nli) = std::env::var("VIGIL_NLI_ENABLED") {
            self.validation.nli.enabled = nli.to_lowercase() == "true";
        }

        // Logging settings
        if let Ok(level) = std::env::var("VIGIL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("VIGIL_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.base_url.is_empty() {
            return Err(ConfigError::invalid(
                "provider.base_url",
                "URL cannot be empty",
            ));
        }

        let temperature = self.generation.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::invalid(
                "generation.temperature",
                format!("temperature must be within 0.0..=2.0, got {}", temperature),
            ));
        }
        if self.generation.max_tokens == 0 {
            return Err(ConfigError::invalid(
                "generation.max_tokens",
                "max_tokens must be non-zero",
            ));
        }

        routing::validate_strategies(&self.routing.strategies)?;

        if self.validation.nli.enabled && self.validation.nli.base_url.is_empty() {
            return Err(ConfigError::invalid(
                "validation.nli.base_url",
                "URL cannot be empty",
            ));
        }
        if self.validation.factuality.enabled {
            if self.validation.factuality.base_url.is_empty() {
                return Err(ConfigError::invalid(
                    "validation.factuality.base_url",
                    "URL cannot be empty",
                ));
            }
            if !(0.0..=1.0).contains(&self.validation.factuality.threshold) {
                return Err(ConfigError::invalid(
                    "validation.factuality.threshold",
                    "threshold must be within 0.0..=1.0",
                ));
            }
        }

        self.logging.validate()?;

        if self.runner.call_budget == 0 {
            return Err(ConfigError::invalid(
                "runner.call_budget",
                "call budget must be non-zero",
            ));
        }

        Ok(())
    }
}

//! Logging configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

use crate::config::error::ConfigError;

/// Modules that accept a `component_levels` override (`vigil::<name>`).
pub const LOG_COMPONENTS: &[&str] = &[
    "agent",
    "cli",
    "config",
    "dataset",
    "features",
    "generation",
    "pipeline",
    "routing",
    "validation",
];

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Pretty-printed logs for humans
    #[default]
    Pretty,
    /// JSON logs for machine parsing
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Per-module levels, keyed by a [`LOG_COMPONENTS`] name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_levels: Option<HashMap<String, String>>,
    /// Log prompt and answer previews (opt-in, defaults to false).
    /// Evaluation datasets may contain material that should not reach log sinks.
    #[serde(default)]
    pub enable_content_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: None,
            enable_content_logging: false,
        }
    }
}

impl LoggingConfig {
    /// Reject levels `tracing` cannot parse and unknown component names,
    /// which would otherwise be dropped silently by the env filter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_level("logging.level", &self.level)?;

        let mut components: Vec<_> = self.component_levels.iter().flatten().collect();
        components.sort();
        for (component, level) in components {
            let field = format!("logging.component_levels.{}", component);
            if !LOG_COMPONENTS.contains(&component.as_str()) {
                return Err(ConfigError::invalid(
                    field,
                    format!("unknown component, expected one of {}", LOG_COMPONENTS.join(", ")),
                ));
            }
            parse_level(&field, level)?;
        }
        Ok(())
    }
}

fn parse_level(field: &str, level: &str) -> Result<LevelFilter, ConfigError> {
    LevelFilter::from_str(level).map_err(|_| {
        ConfigError::invalid(
            field,
            format!("'{}' is not one of off, error, warn, info, debug, trace", level),
        )
    })
}

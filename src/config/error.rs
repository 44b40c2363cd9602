//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading or validating a [`VigilConfig`](super::VigilConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// `field` is the dotted TOML path, e.g. `routing.strategies[0].threshold`
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Dotted path of the offending field, for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parse_error_names_file() {
        let source = toml::from_str::<toml::Value>("[runner").unwrap_err();
        let err = ConfigError::Parse {
            path: Path::new("vigil.toml").to_path_buf(),
            source,
        };
        assert!(err.to_string().starts_with("Failed to parse config vigil.toml"));
        assert!(err.field().is_none());
    }

    #[test]
    fn validation_error_exposes_field() {
        let err = ConfigError::invalid("runner.call_budget", "call budget must be non-zero");
        assert_eq!(err.field(), Some("runner.call_budget"));
        assert_eq!(
            err.to_string(),
            "Invalid value for 'runner.call_budget': call budget must be non-zero"
        );
    }
}

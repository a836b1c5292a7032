//! Configuration error types

use thiserror::Error;

/// Errors raised while loading or checking relay configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration file is missing
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// The merged sources could not be deserialized into `Settings`
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A setting is present but unusable
    #[error("Invalid setting {field}: {message}")]
    ValidationError { field: String, message: String },

    /// `FCM_RELAY_APP_ENV` holds an unknown environment name
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    /// Two configuration location overrides were given at once
    #[error("Conflicting configuration sources: {0}")]
    ConflictingSources(String),

    /// Error surfaced by the config crate while building sources
    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn conflicting_sources<S: Into<String>>(message: S) -> Self {
        ConfigError::ConflictingSources(message.into())
    }
}

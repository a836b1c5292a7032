//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{
    FileSettings, GatewayConfig, LoggerSettings, ServerConfig, Settings, ValidationSettings,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl GatewayConfig {
    /// Validate gateway configuration
    ///
    /// # Validation Rules
    /// - Endpoint must be an absolute http(s) URL
    /// - Server key must not be empty
    /// - Timeout must be greater than 0
    /// - Connect timeout must be greater than 0 and not exceed the timeout
    /// - Delivery check must be one of: transport, status, strict
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_connection()?;
        self.validate_credential()
    }

    /// Server key must not be empty
    pub fn validate_credential(&self) -> Result<(), ConfigError> {
        if self.server_key.trim().is_empty() {
            return Err(ConfigError::validation(
                "gateway.server_key",
                "Gateway server key is required. Set FCM_RELAY_GATEWAY__SERVER_KEY.",
            ));
        }

        Ok(())
    }

    /// Everything except the credential
    pub fn validate_connection(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.endpoint).map_err(|e| ConfigError::ValidationError {
            field: "gateway.endpoint".to_string(),
            message: format!("Invalid gateway endpoint '{}': {}", self.endpoint, e),
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::ValidationError {
                field: "gateway.endpoint".to_string(),
                message: format!(
                    "Gateway endpoint must use http or https, got '{}'",
                    url.scheme()
                ),
            });
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "gateway.timeout_seconds",
                "Gateway timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "gateway.connect_timeout_seconds",
                "Gateway connect timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout_seconds > self.timeout_seconds {
            return Err(ConfigError::ValidationError {
                field: "gateway.connect_timeout_seconds".to_string(),
                message: format!(
                    "Connect timeout ({}s) cannot exceed gateway timeout ({}s).",
                    self.connect_timeout_seconds, self.timeout_seconds
                ),
            });
        }

        self.delivery_check()?;

        Ok(())
    }
}

impl ValidationSettings {
    /// Validate input limits
    ///
    /// Limits are checked even when validation is disabled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("relay.validation.max_token_length", self.max_token_length),
            ("relay.validation.max_title_length", self.max_title_length),
            ("relay.validation.max_body_length", self.max_body_length),
        ];

        for (field, value) in limits {
            if value == 0 {
                return Err(ConfigError::ValidationError {
                    field: field.to_string(),
                    message: "Length limit must be greater than 0.".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl FileSettings {
    /// Validate file settings
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - At least one output must be enabled
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()?;

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_offline()?;
        self.gateway.validate_credential()
    }

    /// Validates everything except the gateway server key
    ///
    /// For commands that never contact the gateway, such as `send --dry-run`.
    pub fn validate_offline(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.gateway.validate_connection()?;
        self.validate_timeouts()?;
        self.relay.validation.validate()?;
        self.logger.validate()?;
        Ok(())
    }

    /// The request timeout must outlast the gateway call it wraps.
    fn validate_timeouts(&self) -> Result<(), ConfigError> {
        if self.server.request_timeout <= self.gateway.timeout_seconds {
            return Err(ConfigError::ValidationError {
                field: "server.request_timeout".to_string(),
                message: format!(
                    "Request timeout ({}s) must be greater than gateway timeout ({}s).",
                    self.server.request_timeout, self.gateway.timeout_seconds
                ),
            });
        }

        Ok(())
    }
}

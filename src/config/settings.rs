//! Configuration settings structures for fcm-relay
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
use crate::relay::DeliveryCheck;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "fcm-relay".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_gateway_endpoint() -> String {
    "https://fcm.googleapis.com/fcm/send".to_string()
}

fn default_gateway_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_delivery_check() -> String {
    "transport".to_string()
}

fn default_max_token_length() -> u64 {
    4096
}

fn default_max_title_length() -> u64 {
    1024
}

fn default_max_body_length() -> u64 {
    4096
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/fcm-relay.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,

    /// Environment whose overlay was loaded; set by `ConfigLoader`
    #[serde(skip)]
    pub environment: Environment,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
            environment: Environment::default(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
        }
    }
}

// ============================================================================
// Gateway Configuration
// ============================================================================

/// Outbound messaging gateway configuration
///
/// `server_key` is the static credential attached to every push as
/// `Authorization: key=<server_key>`. Supply it through
/// `FCM_RELAY_GATEWAY__SERVER_KEY` rather than a committed file.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Push endpoint URL
    #[serde(default = "default_gateway_endpoint")]
    pub endpoint: String,

    /// Server key used in the Authorization header
    #[serde(default)]
    pub server_key: String,

    /// Upper bound for one outbound call, in seconds
    #[serde(default = "default_gateway_timeout")]
    pub timeout_seconds: u64,

    /// Upper bound for establishing the connection, in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// How a completed exchange is judged: "transport", "status" or "strict"
    #[serde(default = "default_delivery_check")]
    pub delivery_check: String,
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Parse the delivery check string into the relay's policy enum
    pub fn delivery_check(&self) -> Result<DeliveryCheck, ConfigError> {
        self.delivery_check
            .parse::<DeliveryCheck>()
            .map_err(|e| ConfigError::ValidationError {
                field: "gateway.delivery_check".to_string(),
                message: e.to_string(),
            })
    }
}

// The credential never reaches logs through `{:?}`.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("endpoint", &self.endpoint)
            .field("server_key", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .field("delivery_check", &self.delivery_check)
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_gateway_endpoint(),
            server_key: String::new(),
            timeout_seconds: default_gateway_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            delivery_check: default_delivery_check(),
        }
    }
}

// ============================================================================
// Relay Configuration
// ============================================================================

/// Pre-dispatch input validation limits (character counts)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Whether requests are validated before dispatch
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_max_token_length")]
    pub max_token_length: u64,

    #[serde(default = "default_max_title_length")]
    pub max_title_length: u64,

    #[serde(default = "default_max_body_length")]
    pub max_body_length: u64,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            max_token_length: default_max_token_length(),
            max_title_length: default_max_title_length(),
            max_body_length: default_max_body_length(),
        }
    }
}

/// Relay behaviour configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RelayConfig {
    #[serde(default)]
    pub validation: ValidationSettings,
}

// ============================================================================
// Logger Settings (compatible with LoggerConfig)
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console_config = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file_config = self.file.into_file_config()?;

        LoggerConfig::new(console_config, file_config, self.level).map_err(|e| {
            ConfigError::ValidationError {
                field: "logger".to_string(),
                message: e.to_string(),
            }
        })
    }
}

impl FileSettings {
    /// Convert FileSettings to FileConfig
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format).map_err(
            |e| ConfigError::ValidationError {
                field: "logger.file".to_string(),
                message: e.to_string(),
            },
        )
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Relay behaviour
    #[serde(default)]
    pub relay: RelayConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}

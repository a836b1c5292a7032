//! CLI argument parsing with clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Relay notifications to Firebase Cloud Messaging
#[derive(Parser, Debug)]
#[command(name = "fcm-relay")]
#[command(about = "Relay notifications to Firebase Cloud Messaging")]
#[command(long_about = "
fcm-relay accepts a notification (device token, title, body) and forwards it
to the Firebase Cloud Messaging legacy HTTP endpoint in a single call,
returning the gateway's response untouched.

The gateway server key is read from configuration; prefer the
FCM_RELAY_GATEWAY__SERVER_KEY environment variable over a config file.

EXAMPLES:
    # Serve the callable endpoint with default configuration
    fcm-relay serve

    # Serve on all interfaces, port 8080
    fcm-relay serve --host 0.0.0.0 --port 8080

    # Check configuration without starting the server
    fcm-relay serve --dry-run

    # Send one notification from the command line
    fcm-relay send --token <DEVICE_TOKEN> --title Hello --body World

    # Print the outbound payload without contacting the gateway
    fcm-relay send --token <DEVICE_TOKEN> --title Hello --body World --dry-run
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this TOML file instead of the layered `config/` directory.
    /// `FCM_RELAY_*` environment variables still apply on top.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects the `config/{environment}.toml` overlay instead of `FCM_RELAY_APP_ENV`.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose (debug) logging. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the callable HTTP endpoint (default)
    ///
    /// Examples:
    ///   fcm-relay serve
    ///   fcm-relay serve --host 0.0.0.0 --port 80
    ///   fcm-relay serve --dry-run
    Serve {
        /// Host address to bind to (default: 127.0.0.1)
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on (default: 3000)
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override; takes precedence over --verbose/--quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Send one notification and print the gateway's response body
    ///
    /// Examples:
    ///   fcm-relay send --token abc --title Hello --body World
    ///   fcm-relay send --token abc --title Hello --body World --dry-run
    Send {
        /// Device registration token
        #[arg(short, long, value_name = "TOKEN")]
        token: String,

        /// Notification title
        #[arg(long, default_value = "")]
        title: String,

        /// Notification body
        #[arg(short, long, default_value = "")]
        body: String,

        /// Print the outbound payload instead of sending it; no server key needed
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["fcm-relay", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["fcm-relay"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from(["fcm-relay", "serve", "--host", "0.0.0.0", "--port", "8080"])
            .unwrap();
        match cli.command {
            Some(Commands::Serve {
                host,
                port,
                log_level,
                dry_run,
            }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
                assert!(log_level.is_none());
                assert!(!dry_run);
            }
            other => panic!("Expected Serve command, got {:?}", other),
        }
    }

    #[test]
    fn test_send_command() {
        let cli = Cli::try_parse_from([
            "fcm-relay", "send", "--token", "abc", "--title", "Hi", "--body", "There", "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Send {
                token,
                title,
                body,
                dry_run,
            }) => {
                assert_eq!(token, "abc");
                assert_eq!(title, "Hi");
                assert_eq!(body, "There");
                assert!(dry_run);
            }
            other => panic!("Expected Send command, got {:?}", other),
        }
    }

    #[test]
    fn test_send_requires_token() {
        let err = Cli::try_parse_from(["fcm-relay", "send", "--title", "Hi"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_environment_aliases() {
        let cli = Cli::try_parse_from(["fcm-relay", "--env", "prod"]).unwrap();
        assert_eq!(cli.env, Some(Environment::Production));
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["fcm-relay", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}

//! CLI module for fcm-relay
//!
//! - Argument parsing with clap
//! - Merging CLI overrides into file configuration
//! - Command handlers for `serve` and `send`

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use crate::config::settings::Settings;
use crate::logger::init_logger;

/// Loads configuration for `cli`, applies its overrides and validates the result
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let merger =
        ConfigurationMerger::from_sources(cli.config.as_deref(), cli.env.map(Into::into))?;
    Ok(merger.merge_cli_args(cli)?)
}

/// Installs the global logger described by `settings.logger`
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings.logger.clone().into_logger_config()?;
    init_logger(logger_config)?;
    Ok(())
}

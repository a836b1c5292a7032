//! Command executor for dispatching CLI commands

use super::handlers::{SendCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::relay::NotificationRequest;

/// Dispatches the parsed command; no subcommand means `serve`
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
        Some(Commands::Send {
            token,
            title,
            body,
            dry_run,
        }) => {
            let request = NotificationRequest::new(token.as_str(), title.as_str(), body.as_str());
            let output = SendCommandHandler::new(&settings)?
                .execute(&request, *dry_run)
                .await?;
            println!("{}", output);
            Ok(())
        }
    }
}

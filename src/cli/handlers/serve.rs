//! Serve command handler
//!
//! Runs the HTTP server, or with `--dry-run` only checks that the relay can
//! be built from the merged configuration.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::relay::NotificationRelay;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            for line in self.validate_only()? {
                println!("{}", line);
            }
            return Ok(());
        }

        Server::new(self.config).run().await?;
        Ok(())
    }

    /// Validates configuration and builds the relay without binding a socket
    pub fn validate_only(&self) -> AppResult<Vec<String>> {
        self.config.validate()?;
        let relay = NotificationRelay::from_settings(&self.config.gateway, &self.config.relay)?;

        Ok(vec![
            "✓ Configuration is valid".to_string(),
            format!("✓ Server would bind to: {}", self.config.server.address()),
            format!("✓ Gateway endpoint: {}", self.config.gateway.endpoint),
            "✓ Gateway server key is configured".to_string(),
            format!(
                "✓ Delivery check: {}, input validation: {}",
                relay.delivery_check(),
                if relay.validates_input() { "on" } else { "off" }
            ),
            "Dry run completed successfully - configuration is ready for deployment".to_string(),
        ])
    }
}

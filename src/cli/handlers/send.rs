//! Send command handler
//!
//! One-shot relay invocation from the command line.

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::relay::{NotificationRelay, NotificationRequest};

pub struct SendCommandHandler {
    relay: NotificationRelay,
}

impl SendCommandHandler {
    pub fn new(config: &Settings) -> AppResult<Self> {
        Ok(Self {
            relay: NotificationRelay::from_settings(&config.gateway, &config.relay)?,
        })
    }

    /// Returns the text to print: the raw gateway body, or with `dry_run`
    /// the outbound payload as pretty JSON
    pub async fn execute(&self, request: &NotificationRequest, dry_run: bool) -> AppResult<String> {
        if dry_run {
            let payload = self.relay.prepare(request)?;
            return serde_json::to_string_pretty(&payload).map_err(|e| AppError::Internal {
                source: anyhow::Error::new(e),
            });
        }

        let response = self.relay.send(request).await?;
        Ok(response.body)
    }
}

//! Server module for managing HTTP server lifecycle
//!
//! Builds the relay from settings, serves the router and shuts down
//! gracefully on Ctrl+C or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use crate::api::routes::create_router;
use crate::config::settings::Settings;
use crate::relay::NotificationRelay;
use crate::state::AppState;
use tokio::net::TcpListener;
use tokio::signal;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until a shutdown signal arrives
    ///
    /// # Errors
    /// - Relay construction errors (invalid gateway configuration)
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = &self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            environment = %settings.application.environment,
            "Application starting"
        );

        tracing::info!(
            host = %settings.server.host,
            port = settings.server.port,
            request_timeout = settings.server.request_timeout,
            "Server configuration loaded"
        );

        // Never log the key itself.
        tracing::info!(
            endpoint = %settings.gateway.endpoint,
            timeout_seconds = settings.gateway.timeout_seconds,
            connect_timeout_seconds = settings.gateway.connect_timeout_seconds,
            delivery_check = %settings.gateway.delivery_check,
            server_key_configured = !settings.gateway.server_key.is_empty(),
            "Gateway configuration loaded"
        );

        tracing::info!(
            validation_enabled = settings.relay.validation.enabled,
            max_token_length = settings.relay.validation.max_token_length,
            max_title_length = settings.relay.validation.max_title_length,
            max_body_length = settings.relay.validation.max_body_length,
            "Relay configuration loaded"
        );

        tracing::info!(
            level = %settings.logger.level,
            console_enabled = settings.logger.console.enabled,
            file_enabled = settings.logger.file.enabled,
            "Logger configuration loaded"
        );

        let relay = NotificationRelay::from_settings(&settings.gateway, &settings.relay)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to build notification relay");
                anyhow::anyhow!("Failed to build notification relay: {}", e)
            })?;
        tracing::info!(transport = relay.transport_name(), "Notification relay ready");

        let state = AppState::new(
            Arc::new(relay),
            settings.application.version.clone(),
            !settings.gateway.server_key.is_empty(),
        );
        let router = create_router(state, Duration::from_secs(settings.server.request_timeout));

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

//! Application state for the Axum router.

use std::sync::Arc;

use crate::relay::NotificationRelay;

/// Shared, read-only state handed to every handler.
///
/// Cloning is cheap; the relay sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<NotificationRelay>,
    /// Application version reported by `/health`
    pub version: String,
    pub gateway_credential_configured: bool,
}

impl AppState {
    pub fn new(
        relay: Arc<NotificationRelay>,
        version: impl Into<String>,
        gateway_credential_configured: bool,
    ) -> Self {
        Self {
            relay,
            version: version.into(),
            gateway_credential_configured,
        }
    }
}

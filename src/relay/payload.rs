//! Wire types for one relay invocation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A caller's request to push one notification to one device.
///
/// Fields are forwarded to the gateway untouched. Missing fields deserialize
/// as empty strings so the pre-dispatch guard can report them by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotificationRequest {
    /// Device registration token
    #[serde(rename = "toToken", default)]
    #[schema(example = "fcm-registration-token")]
    pub recipient_token: String,

    #[serde(default)]
    #[schema(example = "Hello")]
    pub title: String,

    #[serde(default)]
    #[schema(example = "World")]
    pub body: String,
}

impl NotificationRequest {
    pub fn new(
        recipient_token: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient_token: recipient_token.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Display part of a push message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
}

/// Body of the legacy FCM send call:
/// `{"to": ..., "notification": {"title": ..., "body": ...}, "data": {}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundPushPayload {
    pub to: String,
    pub notification: PushNotification,
    /// Always empty; the relay sends no data payload
    pub data: Map<String, Value>,
}

impl From<&NotificationRequest> for OutboundPushPayload {
    fn from(request: &NotificationRequest) -> Self {
        Self {
            to: request.recipient_token.clone(),
            notification: PushNotification {
                title: request.title.clone(),
                body: request.body.clone(),
            },
            data: Map::new(),
        }
    }
}

/// A completed HTTP exchange with the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayResponse {
    pub status: u16,
    /// Raw response text, unmodified
    pub body: String,
}

impl GatewayResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body parsed as JSON, if it is JSON
    pub fn json_body(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

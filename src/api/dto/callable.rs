//! Callable-function protocol DTOs.
//!
//! Requests arrive as `{"data": ...}`; successes answer `{"result": ...}` and
//! failures answer `{"error": {"status", "message", "details"?}}`.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use crate::relay::NotificationRequest;

/// Envelope of a `sendFCMNotification` call
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[schema(example = json!({
    "data": {
        "toToken": "fcm-registration-token",
        "title": "Hello",
        "body": "World"
    }
}))]
pub struct SendNotificationEnvelope {
    pub data: NotificationRequest,
}

/// Successful callable response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "result": {
        "multicast_id": 108,
        "success": 1,
        "failure": 0,
        "results": [{"message_id": "0:1"}]
    }
}))]
pub struct CallableResult {
    /// Gateway response body; JSON bodies are embedded, anything else is a string
    #[schema(value_type = Object)]
    pub result: JsonValue,
}

impl CallableResult {
    pub fn from_gateway_body(body: &str) -> Self {
        let result = serde_json::from_str(body).unwrap_or_else(|_| JsonValue::String(body.to_string()));
        Self { result }
    }
}

/// Canonical callable error status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallableStatus {
    InvalidArgument,
    FailedPrecondition,
    NotFound,
    DeadlineExceeded,
    Unavailable,
    Internal,
}

impl CallableStatus {
    pub fn http_status(&self) -> StatusCode {
        match self {
            CallableStatus::InvalidArgument | CallableStatus::FailedPrecondition => {
                StatusCode::BAD_REQUEST
            }
            CallableStatus::NotFound => StatusCode::NOT_FOUND,
            CallableStatus::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
            CallableStatus::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            CallableStatus::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CallableError {
    pub status: CallableStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<JsonValue>,
}

/// Failed callable response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": {
        "status": "INVALID_ARGUMENT",
        "message": "Validation failed: toToken: must not be empty",
        "details": [{"field": "toToken", "message": "must not be empty"}]
    }
}))]
pub struct CallableErrorResponse {
    pub error: CallableError,
}

impl CallableErrorResponse {
    pub fn new(status: CallableStatus, message: impl Into<String>) -> Self {
        Self {
            error: CallableError {
                status,
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(mut self, details: JsonValue) -> Self {
        self.error.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_gateway_body_is_embedded() {
        let result = CallableResult::from_gateway_body(r#"{"success":1}"#);
        assert_eq!(result.result, json!({"success": 1}));
    }

    #[test]
    fn test_non_json_gateway_body_is_a_string() {
        let result = CallableResult::from_gateway_body("<HTML>Unauthorized</HTML>");
        assert_eq!(result.result, json!("<HTML>Unauthorized</HTML>"));
    }

    #[test]
    fn test_error_response_serialization() {
        let response = CallableErrorResponse::new(CallableStatus::DeadlineExceeded, "timed out");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": {"status": "DEADLINE_EXCEEDED", "message": "timed out"}})
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(CallableStatus::InvalidArgument.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(CallableStatus::FailedPrecondition.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(CallableStatus::DeadlineExceeded.http_status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(CallableStatus::Unavailable.http_status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(CallableStatus::Internal.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

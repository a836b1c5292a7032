//! Conversion of `AppError` into callable-protocol error responses.
//!
//! | AppError                     | status              | HTTP |
//! |------------------------------|---------------------|------|
//! | ValidationErrors, Validation | INVALID_ARGUMENT    | 400  |
//! | BadRequest                   | INVALID_ARGUMENT    | 400  |
//! | Transport (timeout)          | DEADLINE_EXCEEDED   | 504  |
//! | Transport (other kinds)      | UNAVAILABLE         | 503  |
//! | GatewayRejected              | FAILED_PRECONDITION | 400  |
//! | Configuration, Internal      | INTERNAL            | 500  |

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::Uri,
    response::{IntoResponse, Response},
};
use serde_json::{Value as JsonValue, json};

use crate::api::dto::{CallableErrorResponse, CallableStatus};
use crate::error::{AppError, TransportFailure};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let response = match &self {
            AppError::ValidationErrors { errors } => {
                CallableErrorResponse::new(CallableStatus::InvalidArgument, self.to_string())
                    .with_details(json!(errors))
            }
            AppError::Validation { field, reason } => {
                CallableErrorResponse::new(CallableStatus::InvalidArgument, self.to_string())
                    .with_details(json!([{ "field": field, "message": reason }]))
            }
            AppError::BadRequest { message } => {
                CallableErrorResponse::new(CallableStatus::InvalidArgument, message.clone())
            }
            AppError::Transport { kind, .. } => {
                let status = match kind {
                    TransportFailure::Timeout => CallableStatus::DeadlineExceeded,
                    TransportFailure::Connect | TransportFailure::Other => {
                        CallableStatus::Unavailable
                    }
                };
                CallableErrorResponse::new(status, self.to_string())
                    .with_details(json!({ "kind": kind }))
            }
            AppError::GatewayRejected {
                status,
                reason,
                body,
            } => {
                let body = serde_json::from_str::<JsonValue>(body)
                    .unwrap_or_else(|_| JsonValue::String(body.clone()));
                CallableErrorResponse::new(CallableStatus::FailedPrecondition, self.to_string())
                    .with_details(json!({
                        "gateway_status": status,
                        "reason": reason,
                        "body": body,
                    }))
            }
            AppError::Configuration { key, source } => {
                tracing::error!(key = %key, error = ?source, "Configuration error while handling request");
                CallableErrorResponse::new(CallableStatus::Internal, "INTERNAL")
            }
            AppError::Internal { source } => {
                tracing::error!(error = ?source, "Internal error while handling request");
                CallableErrorResponse::new(CallableStatus::Internal, "INTERNAL")
            }
        };

        (response.error.status.http_status(), Json(response)).into_response()
    }
}

/// Malformed callable envelopes are invalid arguments.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Router fallback answering unknown routes in the callable error format
pub async fn fallback_handler(uri: Uri) -> Response {
    let response = CallableErrorResponse::new(
        CallableStatus::NotFound,
        format!("No function at {}", uri.path()),
    );
    (response.error.status.http_status(), Json(response)).into_response()
}

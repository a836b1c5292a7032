//! Callable relay endpoint.

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{CallableErrorResponse, CallableResult, SendNotificationEnvelope};
use crate::api::extract::CallableJson;
use crate::error::AppResult;
use crate::state::AppState;
use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn relay_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(send_fcm_notification))
}

/// POST /sendFCMNotification - Relay one notification to the gateway
///
/// Forwards `data.toToken`, `data.title` and `data.body` to the messaging
/// gateway in a single call and returns the gateway's response body as
/// `result`. With the default delivery check a gateway-level error (for
/// example an invalid token) still succeeds here; inspect `result`.
#[utoipa::path(
    post,
    path = "/sendFCMNotification",
    tag = NOTIFICATION_TAG,
    request_body = SendNotificationEnvelope,
    responses(
        (status = 200, description = "Gateway answered", body = CallableResult),
        (status = 400, description = "Invalid envelope, invalid fields, or gateway rejection under an opt-in delivery check", body = CallableErrorResponse),
        (status = 503, description = "Gateway unreachable", body = CallableErrorResponse),
        (status = 504, description = "Gateway call timed out", body = CallableErrorResponse)
    )
)]
pub async fn send_fcm_notification(
    State(state): State<AppState>,
    CallableJson(envelope): CallableJson<SendNotificationEnvelope>,
) -> AppResult<Json<CallableResult>> {
    let response = state.relay.send(&envelope.data).await?;
    Ok(Json(CallableResult::from_gateway_body(&response.body)))
}

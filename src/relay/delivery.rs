//! How a completed gateway exchange is judged.

use std::str::FromStr;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::error::{AppError, AppResult};
use crate::relay::payload::GatewayResponse;

/// Delivery check applied after the gateway answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryCheck {
    /// Any completed exchange is a success, whatever the status or body
    #[default]
    Transport,
    /// Non-2xx statuses are rejections
    Status,
    /// `Status` plus the legacy FCM result fields (`failure`, `results[].error`, `error`)
    Strict,
}

#[derive(Debug, Error)]
#[error("unknown delivery check '{0}' (expected transport, status or strict)")]
pub struct UnknownDeliveryCheck(String);

impl DeliveryCheck {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryCheck::Transport => "transport",
            DeliveryCheck::Status => "status",
            DeliveryCheck::Strict => "strict",
        }
    }

    /// Returns `GatewayRejected` when the response fails this check
    pub fn evaluate(&self, response: &GatewayResponse) -> AppResult<()> {
        match self {
            DeliveryCheck::Transport => Ok(()),
            DeliveryCheck::Status => check_status(response, None),
            DeliveryCheck::Strict => {
                let error_code = fcm_error_code(response);
                check_status(response, error_code.clone())?;
                match error_code {
                    Some(reason) => Err(rejected(response, reason)),
                    None => Ok(()),
                }
            }
        }
    }
}

impl FromStr for DeliveryCheck {
    type Err = UnknownDeliveryCheck;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transport" => Ok(DeliveryCheck::Transport),
            "status" => Ok(DeliveryCheck::Status),
            "strict" => Ok(DeliveryCheck::Strict),
            _ => Err(UnknownDeliveryCheck(s.to_string())),
        }
    }
}

impl std::fmt::Display for DeliveryCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn check_status(response: &GatewayResponse, error_code: Option<String>) -> AppResult<()> {
    if response.is_success() {
        return Ok(());
    }
    let reason = error_code.unwrap_or_else(|| {
        StatusCode::from_u16(response.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unexpected status")
            .to_string()
    });
    Err(rejected(response, reason))
}

fn rejected(response: &GatewayResponse, reason: String) -> AppError {
    AppError::GatewayRejected {
        status: response.status,
        reason,
        body: response.body.clone(),
    }
}

/// Extracts the gateway's error code from a legacy FCM JSON body.
///
/// Non-JSON bodies yield `None`.
fn fcm_error_code(response: &GatewayResponse) -> Option<String> {
    let body = response.json_body()?;

    match body.get("error") {
        Some(Value::String(code)) => return Some(code.clone()),
        Some(Value::Null) | None => {}
        Some(other) => return Some(other.to_string()),
    }

    let result_error = body
        .get("results")
        .and_then(Value::as_array)
        .and_then(|results| {
            results
                .iter()
                .find_map(|r| r.get("error").and_then(Value::as_str))
        });
    if let Some(code) = result_error {
        return Some(code.to_string());
    }

    match body.get("failure").and_then(Value::as_u64) {
        Some(failures) if failures > 0 => Some(format!("{} message(s) failed", failures)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_of(result: AppResult<()>) -> (u16, String) {
        match result {
            Err(AppError::GatewayRejected { status, reason, .. }) => (status, reason),
            other => panic!("Expected GatewayRejected, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_delivery_check() {
        assert_eq!("transport".parse::<DeliveryCheck>().unwrap(), DeliveryCheck::Transport);
        assert_eq!(" Status ".parse::<DeliveryCheck>().unwrap(), DeliveryCheck::Status);
        assert_eq!("STRICT".parse::<DeliveryCheck>().unwrap(), DeliveryCheck::Strict);
        let err = "always".parse::<DeliveryCheck>().unwrap_err();
        assert!(err.to_string().contains("'always'"));
    }

    #[test]
    fn test_transport_accepts_everything() {
        let check = DeliveryCheck::Transport;
        assert!(check.evaluate(&GatewayResponse::new(401, r#"{"error":"InvalidRegistration"}"#)).is_ok());
        assert!(check.evaluate(&GatewayResponse::new(500, "boom")).is_ok());
        assert!(check.evaluate(&GatewayResponse::new(200, r#"{"failure":1}"#)).is_ok());
    }

    #[test]
    fn test_status_rejects_non_2xx_only() {
        let check = DeliveryCheck::Status;
        assert!(check.evaluate(&GatewayResponse::new(200, r#"{"failure":1}"#)).is_ok());

        let (status, reason) = reason_of(check.evaluate(&GatewayResponse::new(401, "<HTML/>")));
        assert_eq!(status, 401);
        assert_eq!(reason, "Unauthorized");
    }

    #[test]
    fn test_strict_uses_gateway_error_code() {
        let check = DeliveryCheck::Strict;

        let (status, reason) = reason_of(
            check.evaluate(&GatewayResponse::new(401, r#"{"error":"InvalidRegistration"}"#)),
        );
        assert_eq!((status, reason.as_str()), (401, "InvalidRegistration"));

        let body = r#"{"multicast_id":1,"success":0,"failure":1,"results":[{"error":"NotRegistered"}]}"#;
        let (status, reason) = reason_of(check.evaluate(&GatewayResponse::new(200, body)));
        assert_eq!((status, reason.as_str()), (200, "NotRegistered"));

        let (_, reason) = reason_of(check.evaluate(&GatewayResponse::new(200, r#"{"failure":2}"#)));
        assert_eq!(reason, "2 message(s) failed");
    }

    #[test]
    fn test_strict_accepts_clean_results() {
        let check = DeliveryCheck::Strict;
        let body = r#"{"multicast_id":1,"success":1,"failure":0,"results":[{"message_id":"0:1"}]}"#;
        assert!(check.evaluate(&GatewayResponse::new(200, body)).is_ok());
        assert!(check.evaluate(&GatewayResponse::new(200, "plain text")).is_ok());
    }
}

//! The notification relay: validate, translate, dispatch once.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::{GatewayConfig, RelayConfig};
use crate::error::{AppError, AppResult};
use crate::relay::delivery::DeliveryCheck;
use crate::relay::payload::{GatewayResponse, NotificationRequest, OutboundPushPayload};
use crate::relay::transport::{FcmLegacyTransport, PushTransport};
use crate::relay::validation::RequestValidator;

/// Forwards one notification request to the gateway per call.
///
/// Holds only read-only state and is shared across requests as `Arc<NotificationRelay>`.
pub struct NotificationRelay {
    transport: Arc<dyn PushTransport>,
    validator: Option<RequestValidator>,
    delivery_check: DeliveryCheck,
}

impl NotificationRelay {
    pub fn new(
        transport: Arc<dyn PushTransport>,
        validator: Option<RequestValidator>,
        delivery_check: DeliveryCheck,
    ) -> Self {
        Self {
            transport,
            validator,
            delivery_check,
        }
    }

    /// Builds the relay with the legacy FCM transport from loaded settings
    pub fn from_settings(gateway: &GatewayConfig, relay: &RelayConfig) -> AppResult<Self> {
        let transport = FcmLegacyTransport::new(gateway)?;
        let validator = relay
            .validation
            .enabled
            .then(|| RequestValidator::new(&relay.validation));

        Ok(Self::new(
            Arc::new(transport),
            validator,
            gateway.delivery_check()?,
        ))
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    pub fn delivery_check(&self) -> DeliveryCheck {
        self.delivery_check
    }

    pub fn validates_input(&self) -> bool {
        self.validator.is_some()
    }

    /// Runs the pre-dispatch guard and returns the payload that would be sent
    pub fn prepare(&self, request: &NotificationRequest) -> AppResult<OutboundPushPayload> {
        if let Some(validator) = &self.validator {
            validator.validate(request)?;
        }
        Ok(OutboundPushPayload::from(request))
    }

    /// Sends one notification; the gateway body is returned verbatim.
    ///
    /// Issues exactly one outbound call and never retries.
    pub async fn send(&self, request: &NotificationRequest) -> AppResult<GatewayResponse> {
        let payload = self.prepare(request).inspect_err(|e| {
            warn!(error = %e, "Notification request rejected before dispatch");
        })?;

        let response = match self.transport.deliver(&payload).await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    transport = self.transport.name(),
                    error = %e,
                    "Error sending notification"
                );
                return Err(e);
            }
        };

        if let Err(e) = self.delivery_check.evaluate(&response) {
            if let AppError::GatewayRejected { status, reason, .. } = &e {
                error!(
                    status = *status,
                    reason = %reason,
                    delivery_check = %self.delivery_check,
                    "Gateway rejected notification"
                );
            }
            return Err(e);
        }

        info!(
            status = response.status,
            body = %response.body,
            "Notification sent"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationSettings;
    use crate::error::TransportFailure;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records every payload and answers with a fixed response
    struct RecordingTransport {
        sent: Mutex<Vec<OutboundPushPayload>>,
        response: GatewayResponse,
    }

    impl RecordingTransport {
        fn answering(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                response: GatewayResponse::new(status, body),
            })
        }

        fn sent(&self) -> Vec<OutboundPushPayload> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PushTransport for RecordingTransport {
        async fn deliver(&self, payload: &OutboundPushPayload) -> AppResult<GatewayResponse> {
            self.sent.lock().unwrap().push(payload.clone());
            Ok(self.response.clone())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    fn validator() -> Option<RequestValidator> {
        Some(RequestValidator::new(&ValidationSettings::default()))
    }

    #[tokio::test]
    async fn test_send_returns_gateway_body_verbatim() {
        let transport = RecordingTransport::answering(200, r#"{"success":1}"#);
        let relay = NotificationRelay::new(transport.clone(), validator(), DeliveryCheck::Transport);

        let request = NotificationRequest::new("device-1", "Hello", "World");
        let response = relay.send(&request).await.unwrap();

        assert_eq!(response.body, r#"{"success":1}"#);
        assert_eq!(transport.sent(), vec![OutboundPushPayload::from(&request)]);
    }

    #[tokio::test]
    async fn test_default_policy_resolves_gateway_errors() {
        let transport = RecordingTransport::answering(401, r#"{"error":"InvalidRegistration"}"#);
        let relay = NotificationRelay::new(transport, validator(), DeliveryCheck::Transport);

        let response = relay
            .send(&NotificationRequest::new("device-1", "Hello", "World"))
            .await
            .unwrap();
        assert_eq!(response.status, 401);
        assert_eq!(response.body, r#"{"error":"InvalidRegistration"}"#);
    }

    #[tokio::test]
    async fn test_identical_requests_are_sent_twice() {
        let transport = RecordingTransport::answering(200, "{}");
        let relay = NotificationRelay::new(transport.clone(), validator(), DeliveryCheck::Transport);
        let request = NotificationRequest::new("device-1", "Hello", "World");

        relay.send(&request).await.unwrap();
        relay.send(&request).await.unwrap();

        assert_eq!(transport.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_transport() {
        let transport = RecordingTransport::answering(200, "{}");
        let relay = NotificationRelay::new(transport.clone(), validator(), DeliveryCheck::Transport);

        let err = relay
            .send(&NotificationRequest::new("", "Hello", "World"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationErrors { .. }));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_validation_passes_empty_fields_through() {
        let transport = RecordingTransport::answering(200, "{}");
        let relay = NotificationRelay::new(transport.clone(), None, DeliveryCheck::Transport);

        relay
            .send(&NotificationRequest::new("", "", ""))
            .await
            .unwrap();
        assert_eq!(transport.sent()[0].to, "");
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_gateway_failure() {
        let body = r#"{"success":0,"failure":1,"results":[{"error":"NotRegistered"}]}"#;
        let transport = RecordingTransport::answering(200, body);
        let relay = NotificationRelay::new(transport.clone(), validator(), DeliveryCheck::Strict);

        let err = relay
            .send(&NotificationRequest::new("device-1", "Hello", "World"))
            .await
            .unwrap_err();

        match err {
            AppError::GatewayRejected { status, reason, body: rejected_body } => {
                assert_eq!(status, 200);
                assert_eq!(reason, "NotRegistered");
                assert_eq!(rejected_body, body);
            }
            other => panic!("Expected GatewayRejected, got {:?}", other),
        }
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_relay_against_mock_gateway_sends_once_per_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/fcm/send")
            .match_header("authorization", "key=test-key")
            .with_status(200)
            .with_body(r#"{"success":1}"#)
            .expect(2)
            .create_async()
            .await;

        let transport = FcmLegacyTransport::with_timeouts(
            &format!("{}/fcm/send", server.url()),
            "test-key",
            Duration::from_secs(5),
            Duration::from_secs(5),
        )
        .unwrap();
        let relay = NotificationRelay::new(Arc::new(transport), validator(), DeliveryCheck::Transport);
        let request = NotificationRequest::new("device-1", "Hello", "World");

        assert_eq!(relay.send(&request).await.unwrap().body, r#"{"success":1}"#);
        assert_eq!(relay.send(&request).await.unwrap().body, r#"{"success":1}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_gateway_fails_with_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = GatewayConfig {
            endpoint: format!("http://{}/fcm/send", addr),
            server_key: "test-key".to_string(),
            ..Default::default()
        };
        let relay = NotificationRelay::from_settings(&gateway, &RelayConfig::default()).unwrap();

        let err = relay
            .send(&NotificationRequest::new("device-1", "Hello", "World"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Transport { kind: TransportFailure::Connect, .. }
        ));
    }

    #[test]
    fn test_from_settings_honours_relay_config() {
        let gateway = GatewayConfig {
            server_key: "k".to_string(),
            delivery_check: "status".to_string(),
            ..Default::default()
        };
        let mut relay_config = RelayConfig::default();
        relay_config.validation.enabled = false;

        let relay = NotificationRelay::from_settings(&gateway, &relay_config).unwrap();
        assert_eq!(relay.delivery_check(), DeliveryCheck::Status);
        assert!(!relay.validates_input());
        assert_eq!(relay.transport_name(), "fcm-legacy");
    }
}

//! Outbound gateway transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::AUTHORIZATION;

use crate::config::GatewayConfig;
use crate::error::{AppError, AppResult};
use crate::relay::payload::{GatewayResponse, OutboundPushPayload};

/// The single outbound call made per relay invocation.
///
/// Implementations must not retry. A completed exchange returns the
/// response whatever its status; only an exchange that could not complete
/// is an error.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn deliver(&self, payload: &OutboundPushPayload) -> AppResult<GatewayResponse>;

    /// Transport name for logging
    fn name(&self) -> &'static str;
}

/// Legacy FCM HTTP transport (`Authorization: key=<server key>`).
pub struct FcmLegacyTransport {
    client: reqwest::Client,
    endpoint: Url,
    server_key: String,
}

impl FcmLegacyTransport {
    pub fn new(config: &GatewayConfig) -> AppResult<Self> {
        Self::with_timeouts(
            &config.endpoint,
            config.server_key.clone(),
            config.timeout(),
            config.connect_timeout(),
        )
    }

    /// Builds the transport with explicit bounds on the whole call and on connecting
    pub fn with_timeouts(
        endpoint: &str,
        server_key: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> AppResult<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| AppError::Configuration {
            key: "gateway.endpoint".to_string(),
            source: anyhow::Error::new(e),
        })?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration {
                key: "gateway".to_string(),
                source: anyhow::Error::new(e),
            })?;

        Ok(Self {
            client,
            endpoint,
            server_key: server_key.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PushTransport for FcmLegacyTransport {
    async fn deliver(&self, payload: &OutboundPushPayload) -> AppResult<GatewayResponse> {
        // `json` sets Content-Type: application/json
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, format!("key={}", self.server_key))
            .json(payload)
            .send()
            .await
            .map_err(AppError::transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(AppError::transport)?;

        Ok(GatewayResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "fcm-legacy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportFailure;
    use crate::relay::payload::NotificationRequest;
    use mockito::Matcher;
    use serde_json::json;

    fn payload() -> OutboundPushPayload {
        OutboundPushPayload::from(&NotificationRequest::new("device-1", "Hello", "World"))
    }

    fn transport(endpoint: &str, timeout: Duration) -> FcmLegacyTransport {
        FcmLegacyTransport::with_timeouts(endpoint, "test-key", timeout, timeout).unwrap()
    }

    #[tokio::test]
    async fn test_deliver_posts_exact_payload_and_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/fcm/send")
            .match_header("authorization", "key=test-key")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "to": "device-1",
                "notification": {"title": "Hello", "body": "World"},
                "data": {}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":1}"#)
            .expect(1)
            .create_async()
            .await;

        let endpoint = format!("{}/fcm/send", server.url());
        let response = transport(&endpoint, Duration::from_secs(5))
            .deliver(&payload())
            .await
            .unwrap();

        assert_eq!(response, GatewayResponse::new(200, r#"{"success":1}"#));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_deliver_returns_non_2xx_as_completed_exchange() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/fcm/send")
            .with_status(401)
            .with_body(r#"{"error":"InvalidRegistration"}"#)
            .create_async()
            .await;

        let endpoint = format!("{}/fcm/send", server.url());
        let response = transport(&endpoint, Duration::from_secs(5))
            .deliver(&payload())
            .await
            .unwrap();

        assert_eq!(response.status, 401);
        assert_eq!(response.body, r#"{"error":"InvalidRegistration"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_refused_connection_is_connect_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = format!("http://{}/fcm/send", addr);
        let err = transport(&endpoint, Duration::from_secs(5))
            .deliver(&payload())
            .await
            .unwrap_err();

        assert!(
            matches!(err, AppError::Transport { kind: TransportFailure::Connect, .. }),
            "unexpected error: {:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_silent_gateway_is_timeout_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept connections and never answer.
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let endpoint = format!("http://{}/fcm/send", addr);
        let err = transport(&endpoint, Duration::from_millis(200))
            .deliver(&payload())
            .await
            .unwrap_err();

        assert!(
            matches!(err, AppError::Transport { kind: TransportFailure::Timeout, .. }),
            "unexpected error: {:?}",
            err
        );
        server.abort();
    }

    /// Serves one status line and a truncated body, then stalls or hangs up.
    async fn truncated_gateway(hang_up: bool) -> (String, tokio::task::JoinHandle<()>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 4096];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"suc")
                .await
                .unwrap();
            socket.flush().await.unwrap();
            if hang_up {
                drop(socket);
            } else {
                tokio::time::sleep(Duration::from_secs(30)).await;
            }
        });
        (format!("http://{}/fcm/send", addr), server)
    }

    #[tokio::test]
    async fn test_stalled_body_is_timeout_failure() {
        let (endpoint, server) = truncated_gateway(false).await;

        let err = transport(&endpoint, Duration::from_millis(300))
            .deliver(&payload())
            .await
            .unwrap_err();

        assert!(
            matches!(err, AppError::Transport { kind: TransportFailure::Timeout, .. }),
            "unexpected error: {:?}",
            err
        );
        server.abort();
    }

    #[tokio::test]
    async fn test_truncated_body_is_other_failure() {
        let (endpoint, server) = truncated_gateway(true).await;

        let err = transport(&endpoint, Duration::from_secs(5))
            .deliver(&payload())
            .await
            .unwrap_err();

        assert!(
            matches!(err, AppError::Transport { kind: TransportFailure::Other, .. }),
            "unexpected error: {:?}",
            err
        );
        server.abort();
    }

    #[test]
    fn test_invalid_endpoint_is_configuration_error() {
        let result = FcmLegacyTransport::with_timeouts(
            "not a url",
            "key",
            Duration::from_secs(1),
            Duration::from_secs(1),
        );
        assert!(matches!(
            result,
            Err(AppError::Configuration { ref key, .. }) if key == "gateway.endpoint"
        ));
    }
}

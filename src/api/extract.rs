//! Request extractors.

use crate::error::{AppError, AppResult};
use axum::Json;
use axum::extract::{FromRequest, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;

/// JSON body extractor whose rejection is an `AppError`, so malformed
/// envelopes answer in the callable error format.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallableJson<T>(pub T);

impl<T, S> FromRequest<S> for CallableJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(CallableJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::SendNotificationEnvelope;
    use axum::body::Body;
    use axum::http::{Method, header};

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/sendFCMNotification")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_envelope() {
        let request = json_request(r#"{"data":{"toToken":"t","title":"a","body":"b"}}"#);
        let CallableJson(envelope) =
            CallableJson::<SendNotificationEnvelope>::from_request(request, &())
                .await
                .unwrap();
        assert_eq!(envelope.data.recipient_token, "t");
    }

    #[tokio::test]
    async fn test_missing_data_is_bad_request() {
        let request = json_request(r#"{"toToken":"t"}"#);
        let result = CallableJson::<SendNotificationEnvelope>::from_request(request, &()).await;
        match result {
            Err(AppError::BadRequest { message }) => assert!(message.contains("data")),
            other => panic!("Expected BadRequest, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        let request = json_request("{not json");
        let result = CallableJson::<SendNotificationEnvelope>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }
}

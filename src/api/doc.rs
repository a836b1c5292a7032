use utoipa::OpenApi;

pub const HEALTH_TAG: &str = "Health";
pub const NOTIFICATION_TAG: &str = "Notifications";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "fcm-relay",
        description = "Callable relay that forwards notifications to Firebase Cloud Messaging",
    ),
    components(
        schemas(
            crate::api::dto::CallableErrorResponse,
            crate::api::dto::CallableStatus,
            crate::error::ValidationFieldError,
            crate::error::TransportFailure,
        )
    ),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = NOTIFICATION_TAG, description = "Notification relay endpoints"),
    )
)]
pub struct ApiDoc;

//! Router configuration for the API.

use std::time::Duration;

use axum::http::StatusCode;
use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{fallback_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Creates the application router.
///
/// # Routes
/// - `POST /sendFCMNotification` - callable relay endpoint
/// - `/health`, `/health/ready`, `/health/live` - probes
/// - `/swagger-ui`, `/api-docs/openapi.json` - API documentation
///
/// # Middleware Order
/// Last added runs first: request ID, then logging, then the timeout,
/// compression and CORS layers.
///
/// The request timeout answers 504 with an empty body. Configuration keeps
/// it above the gateway timeout, so a stalled gateway still surfaces as a
/// callable `DEADLINE_EXCEEDED` error.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::relay::relay_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, openapi))
        .fallback(fallback_handler)
        // Browsers call callable functions cross-origin.
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

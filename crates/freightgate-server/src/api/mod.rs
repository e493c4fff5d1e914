mod calculate;
mod webhook;

use axum::{
    http::{header, Method as HttpMethod, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use freightgate_datafrete::DatafreteClient;
use freightgate_platform::PlatformClient;

use crate::middleware::{request_id, require_operator_token, OperatorAuth};

#[derive(Clone)]
pub struct AppState {
    pub datafrete: DatafreteClient,
    pub platform: PlatformClient,
}

/// Module error body in the platform's `{error, message}` schema.
#[derive(Debug, Serialize)]
pub struct ModuleError {
    pub error: &'static str,
    pub message: String,
}

impl ModuleError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            error: code,
            message: message.into(),
        }
    }
}

impl IntoResponse for ModuleError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error {
            "CALCULATE_EMPTY_CART" => StatusCode::BAD_REQUEST,
            _ => StatusCode::CONFLICT,
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    service: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([HttpMethod::GET, HttpMethod::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState, operator_auth: OperatorAuth) -> Router {
    let webhook_routes = Router::new()
        .route("/datafrete/webhook", post(webhook::handle))
        .layer(axum::middleware::from_fn_with_state(
            operator_auth,
            require_operator_token,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/calculate", post(calculate::handle))
        .merge(webhook_routes)
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
    })
}

//! API handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::alerts::{process_alerts, AlertOutcome, Severity};
use crate::api::docs::ApiDoc;
use crate::api::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Container health check, reports the resolved version
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version().to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "API is up", body = StatusResponse))
)]
pub async fn api_health() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

#[utoipa::path(
    get,
    path = "/api/ping",
    tag = "Ping",
    responses((status = 200, description = "Empty acknowledgement"))
)]
pub async fn api_ping() -> StatusCode {
    StatusCode::OK
}

#[utoipa::path(
    get,
    path = "/api/v2/health",
    tag = "Health",
    responses((status = 200, description = "API is up", body = StatusResponse))
)]
pub async fn v2_health() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

#[utoipa::path(
    get,
    path = "/api/v2/ping",
    tag = "Ping",
    responses((status = 200, description = "Empty acknowledgement"))
)]
pub async fn v2_ping() -> StatusCode {
    StatusCode::OK
}

/// Alertmanager webhook
///
/// Malformed bodies are answered with `{"status": "error"}` and HTTP 200.
#[utoipa::path(
    post,
    path = "/api/alerts",
    tag = "Alerts",
    request_body = crate::alerts::AlertPayload,
    responses((status = 200, description = "Receipt or error object"))
)]
pub async fn receive_alerts(body: Bytes) -> AlertOutcome {
    process_alerts(&body, Severity::Warning)
}

/// Alertmanager webhook for critical routes
#[utoipa::path(
    post,
    path = "/api/alerts/critical",
    tag = "Alerts",
    request_body = crate::alerts::AlertPayload,
    responses((status = 200, description = "Receipt or error object"))
)]
pub async fn receive_critical_alerts(body: Bytes) -> AlertOutcome {
    process_alerts(&body, Severity::Critical)
}

/// OpenAPI document, stamped with the running version
pub async fn openapi(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    let mut doc = ApiDoc::openapi();
    doc.info.version = state.version().to_string();
    Json(doc)
}

impl IntoResponse for AlertOutcome {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

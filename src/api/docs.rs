//! OpenAPI description of the HTTP surface

use utoipa::OpenApi;

use crate::alerts::{Alert, AlertPayload};
use crate::api::handlers::{HealthResponse, StatusResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "observability-test-app",
        description = "Health, ping and Alertmanager webhook endpoints for pipeline testing"
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::api_health,
        crate::api::handlers::api_ping,
        crate::api::handlers::v2_health,
        crate::api::handlers::v2_ping,
        crate::api::handlers::receive_alerts,
        crate::api::handlers::receive_critical_alerts,
    ),
    components(schemas(HealthResponse, StatusResponse, AlertPayload, Alert)),
    tags(
        (name = "health", description = "Container health check"),
        (name = "Health", description = "API health"),
        (name = "Ping", description = "Liveness pings"),
        (name = "Alerts", description = "Alertmanager webhooks"),
    )
)]
pub struct ApiDoc;

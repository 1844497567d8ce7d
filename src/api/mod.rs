//! HTTP API server

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::settings::Settings;

pub mod docs;
pub mod handlers;
pub mod state;

pub use state::AppState;

/// Build the full router: top-level routes plus the `/api` groups
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(handlers::openapi))
        .nest("/api", v1_routes().nest("/v2", v2_routes()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Routes mounted under `/api`
pub fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::api_health))
        .route("/ping", get(handlers::api_ping))
        .route("/alerts", post(handlers::receive_alerts))
        .route("/alerts/critical", post(handlers::receive_critical_alerts))
}

/// Routes mounted under `/api/v2`
pub fn v2_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::v2_health))
        .route("/ping", get(handlers::v2_ping))
}

/// Convenience helper building state from already-resolved settings
pub fn create_router_with_settings(settings: Settings) -> Router {
    create_router(AppState::new(settings))
}

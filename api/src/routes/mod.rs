//! HTTP route entry point.
//!
//! This module defines all HTTP entry points and assembles them into the
//! application router. Routes are organized by domain:
//!
//! - `/` → greeting (public)
//! - `/health` → liveness probe (public)
//! - `/api/system` → host metrics
//! - `/api/weather` → current weather reading
//! - `/api/dashboard` → aggregate of the above plus links and notes
//!
//! Anything else falls through to a `404` error envelope.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing::get};
use serde_json::json;
use util::state::AppState;

use crate::response::ApiError;
use crate::routes::{
    dashboard::dashboard_routes, health::health_routes, system::system_routes,
    weather::weather_routes,
};

pub mod common;
pub mod dashboard;
pub mod health;
pub mod system;
pub mod weather;

/// Builds the complete application router.
///
/// Route registration is centralized here instead of `main` so the whole
/// surface can be driven in tests with substituted collaborators and no
/// listener.
pub fn app(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .nest("/health", health_routes())
        .nest("/api", api_routes())
        .fallback(not_found)
        .with_state(app_state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/system", system_routes())
        .nest("/weather", weather_routes())
        .nest("/dashboard", dashboard_routes())
}

/// GET /
async fn index() -> impl IntoResponse {
    Json(json!({ "message": "hello world" }))
}

/// Fallback for unmatched routes: a well-formed 404 error envelope, so
/// clients never see transport-level error text.
async fn not_found(State(state): State<AppState>) -> impl IntoResponse {
    let body = ApiError::error_at(
        "Route not found",
        Some("NOT_FOUND".into()),
        state.clock().now(),
    );
    (StatusCode::NOT_FOUND, Json(body))
}

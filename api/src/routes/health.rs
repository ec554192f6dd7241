use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use serde_json::json;
use util::state::AppState;

/// Builds the `/health` route group.
///
/// This includes a single `GET /health` endpoint that reports liveness.
/// Useful for uptime checks, load balancers, or deployment health monitoring.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// GET /health
///
/// Returns a plain liveness object; deliberately not wrapped in the
/// response envelope so probes stay trivial to parse.
///
/// ### Response
/// - `200 OK`
///
/// ```json
/// {
///   "status": "ok",
///   "timestamp": "2025-06-01T12:00:00+00:00"
/// }
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": state.clock().now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::health_check;
    use axum::body::to_bytes;
    use axum::extract::State;
    use axum::response::IntoResponse;
    use serde_json::Value;

    use crate::tests::helpers::{fixed_state, FIXED_TIMESTAMP};

    /// Unit test for `health_check` handler.
    ///
    /// Asserts that the JSON response matches the expected structure and values.
    #[tokio::test]
    async fn health_check_returns_ok_json() {
        let response = health_check(State(fixed_state())).await.into_response();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["timestamp"], FIXED_TIMESTAMP);
    }
}

use std::time::Duration;

use axum::{Json, extract::State};
use util::config;
use util::failure::Failure;
use util::state::AppState;
use util::weather::WeatherInfo;

use crate::response::{ApiFailure, ApiResponse};
use crate::schemas::{self, SchemaId};

/// GET /api/weather
///
/// Fetches the current reading from the weather collaborator. The source
/// may answer with a reading, answer with nothing (`data: null`, still a
/// success), or fail; a fetch that outlives the configured timeout counts
/// as a service failure.
///
/// ### Response
/// - `200 OK` → `ApiResponse<WeatherInfo | null>`
/// - `503` → `{code: "WEATHER_SERVICE_ERROR"}` when the source is down
/// - `500` → error envelope for anything else
pub async fn get_weather(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Option<WeatherInfo>>>, ApiFailure> {
    let reading = fetch_weather(&state).await?;

    if let Some(info) = &reading {
        let value = serde_json::to_value(info)
            .map_err(|e| Failure::Runtime(format!("failed to serialize weather info: {e}")))?;
        schemas::ensure_valid(SchemaId::WeatherInfo, &value)?;
    }

    Ok(Json(ApiResponse::success_at(reading, state.clock().now())))
}

/// Fetch with a timeout; an elapsed timeout classifies as the same
/// service-unavailable failure a down backend raises.
pub(crate) async fn fetch_weather(state: &AppState) -> Result<Option<WeatherInfo>, Failure> {
    let timeout = Duration::from_millis(config::weather_timeout_ms());
    match tokio::time::timeout(timeout, state.weather().fetch()).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Weather fetch timed out after {timeout:?}");
            Err(Failure::weather_unavailable())
        }
    }
}

use axum::{Json, extract::State};
use util::failure::Failure;
use util::state::AppState;

use crate::response::{ApiFailure, ApiResponse, classify};
use crate::routes::common::{DashboardData, QuickLink, TimeInfo};
use crate::routes::system::get::collect_system_info;
use crate::routes::weather::get::fetch_weather;
use crate::schemas::{self, SchemaId};

/// GET /api/dashboard
///
/// Aggregate view: host metrics, the current weather reading (nullable),
/// wall-clock time, pinned quick links, and recent notes. A weather
/// failure degrades to `weather: null` instead of failing the aggregate;
/// a metrics failure still fails it, since the dashboard is useless
/// without the system block.
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardData>>, ApiFailure> {
    let system = collect_system_info(&state).await?;

    let value = serde_json::to_value(&system)
        .map_err(|e| Failure::Runtime(format!("failed to serialize system info: {e}")))?;
    schemas::ensure_valid(SchemaId::SystemInfo, &value)?;

    let weather = match fetch_weather(&state).await {
        Ok(reading) => reading,
        Err(failure) => {
            let classified = classify(&failure);
            tracing::warn!(
                code = %classified.code,
                "Dashboard weather degraded to null: {}",
                classified.message
            );
            None
        }
    };

    let now = state.clock().now();
    let data = DashboardData {
        system,
        weather,
        time: TimeInfo {
            current: now.to_rfc3339(),
            timezone: "UTC".into(),
        },
        quick_links: default_quick_links(),
        recent_notes: Vec::new(),
    };

    Ok(Json(ApiResponse::success_at(data, now)))
}

/// Built-in shortcuts; there is no persistence to source them from.
fn default_quick_links() -> Vec<QuickLink> {
    vec![
        QuickLink {
            id: "mail".into(),
            title: "Mail".into(),
            url: "https://mail.example.com".into(),
            icon: Some("envelope".into()),
        },
        QuickLink {
            id: "calendar".into(),
            title: "Calendar".into(),
            url: "https://calendar.example.com".into(),
            icon: None,
        },
        QuickLink {
            id: "repos".into(),
            title: "Repositories".into(),
            url: "https://git.example.com".into(),
            icon: Some("code".into()),
        },
    ]
}

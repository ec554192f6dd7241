use axum::{Json, extract::State};
use util::failure::Failure;
use util::metrics::{CoreTimes, placeholder_disk};
use util::state::AppState;

use crate::response::{ApiFailure, ApiResponse};
use crate::routes::common::{CpuInfo, SystemInfo, UsageInfo};
use crate::schemas::{self, SchemaId};

/// GET /api/system
///
/// Samples host metrics, validates the payload shape, and wraps it in the
/// response envelope. Any collaborator failure or payload violation is
/// classified into an error envelope; nothing invalid is ever served.
///
/// ### Response
/// - `200 OK` → `ApiResponse<SystemInfo>`
/// - `500` → error envelope on collaborator failure or payload bug
pub async fn get_system(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SystemInfo>>, ApiFailure> {
    let info = collect_system_info(&state).await?;

    let value = serde_json::to_value(&info)
        .map_err(|e| Failure::Runtime(format!("failed to serialize system info: {e}")))?;
    schemas::ensure_valid(SchemaId::SystemInfo, &value)?;

    Ok(Json(ApiResponse::success_at(info, state.clock().now())))
}

/// Pulls raw numbers from the metrics collaborator and derives the payload.
pub(crate) async fn collect_system_info(state: &AppState) -> Result<SystemInfo, Failure> {
    let metrics = state.metrics();

    let core_times = metrics.cpu_core_times().await?;
    let cores = metrics.cores().await?;
    let total_memory = metrics.total_memory_bytes().await?;
    let free_memory = metrics.free_memory_bytes().await?;
    let uptime = metrics.uptime_seconds().await?;

    let used_memory = total_memory.saturating_sub(free_memory);
    let disk = placeholder_disk();

    Ok(SystemInfo {
        cpu: CpuInfo {
            usage: cpu_usage_percent(&core_times),
            cores: cores.max(1) as u64,
        },
        memory: UsageInfo {
            total: total_memory,
            used: used_memory,
            percentage: percentage(used_memory, total_memory),
        },
        disk: UsageInfo {
            total: disk.total,
            used: disk.used,
            percentage: percentage(disk.used, disk.total),
        },
        uptime,
    })
}

/// Mean busy share across cores, percent, one decimal.
///
/// A core reporting `total == 0` contributes 0 rather than dividing by zero.
fn cpu_usage_percent(core_times: &[CoreTimes]) -> f64 {
    if core_times.is_empty() {
        return 0.0;
    }
    let sum: f64 = core_times
        .iter()
        .map(|t| {
            if t.total == 0 {
                0.0
            } else {
                (t.total.saturating_sub(t.idle)) as f64 / t.total as f64 * 100.0
            }
        })
        .sum();
    round1(sum / core_times.len() as f64)
}

fn percentage(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round1(used as f64 / total as f64 * 100.0)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core(idle: u64, total: u64) -> CoreTimes {
        CoreTimes { idle, total }
    }

    #[test]
    fn four_half_idle_cores_average_to_fifty() {
        let times = vec![core(50, 100); 4];
        assert_eq!(cpu_usage_percent(&times), 50.0);
    }

    #[test]
    fn zero_total_core_contributes_zero() {
        let times = vec![core(0, 0), core(0, 100)];
        assert_eq!(cpu_usage_percent(&times), 50.0);
    }

    #[test]
    fn no_cores_means_zero_usage() {
        assert_eq!(cpu_usage_percent(&[]), 0.0);
    }

    #[test]
    fn usage_is_rounded_to_one_decimal() {
        // 1/3 busy -> 33.333...% -> 33.3
        let times = vec![core(200, 300)];
        assert_eq!(cpu_usage_percent(&times), 33.3);
    }

    #[test]
    fn percentage_guards_zero_total() {
        assert_eq!(percentage(10, 0), 0.0);
        assert_eq!(percentage(1, 3), 33.3);
    }
}

//! Shared fixtures: canned collaborators, a pinned clock, and a request
//! helper that drives the full router without a listener.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;
use util::clock::{Clock, FixedClock};
use util::failure::Failure;
use util::metrics::{CoreTimes, MetricsSource};
use util::state::AppState;
use util::weather::{WeatherInfo, WeatherKind, WeatherSource};

use crate::routes::app;

pub const FIXED_TIMESTAMP: &str = "2025-06-01T12:00:00+00:00";

pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    ))
}

/// Metrics source returning the same numbers on every call.
#[derive(Clone)]
pub struct StaticMetrics {
    pub core_times: Vec<CoreTimes>,
    pub cores: usize,
    pub total_memory: u64,
    pub free_memory: u64,
    pub uptime: u64,
}

impl Default for StaticMetrics {
    fn default() -> Self {
        Self {
            core_times: vec![CoreTimes { idle: 50, total: 100 }; 4],
            cores: 4,
            total_memory: 16_000_000_000,
            free_memory: 8_000_000_000,
            uptime: 3600,
        }
    }
}

#[async_trait]
impl MetricsSource for StaticMetrics {
    async fn cpu_core_times(&self) -> Result<Vec<CoreTimes>, Failure> {
        Ok(self.core_times.clone())
    }

    async fn cores(&self) -> Result<usize, Failure> {
        Ok(self.cores)
    }

    async fn total_memory_bytes(&self) -> Result<u64, Failure> {
        Ok(self.total_memory)
    }

    async fn free_memory_bytes(&self) -> Result<u64, Failure> {
        Ok(self.free_memory)
    }

    async fn uptime_seconds(&self) -> Result<u64, Failure> {
        Ok(self.uptime)
    }
}

/// Metrics source whose every method fails.
pub struct FailingMetrics;

#[async_trait]
impl MetricsSource for FailingMetrics {
    async fn cpu_core_times(&self) -> Result<Vec<CoreTimes>, Failure> {
        Err(Failure::Runtime("metrics backend offline".into()))
    }

    async fn cores(&self) -> Result<usize, Failure> {
        Err(Failure::Runtime("metrics backend offline".into()))
    }

    async fn total_memory_bytes(&self) -> Result<u64, Failure> {
        Err(Failure::Runtime("metrics backend offline".into()))
    }

    async fn free_memory_bytes(&self) -> Result<u64, Failure> {
        Err(Failure::Runtime("metrics backend offline".into()))
    }

    async fn uptime_seconds(&self) -> Result<u64, Failure> {
        Err(Failure::Runtime("metrics backend offline".into()))
    }
}

/// Weather source that replays a fixed outcome.
pub struct CannedWeather(pub Result<Option<WeatherInfo>, Failure>);

#[async_trait]
impl WeatherSource for CannedWeather {
    async fn fetch(&self) -> Result<Option<WeatherInfo>, Failure> {
        self.0.clone()
    }
}

pub fn sample_weather() -> WeatherInfo {
    WeatherInfo {
        temperature: 21.5,
        condition: "Clear skies".into(),
        weather_type: WeatherKind::Sunny,
        humidity: 40.0,
        last_updated: FIXED_TIMESTAMP.into(),
    }
}

pub fn state_with(
    metrics: Arc<dyn MetricsSource>,
    weather: Arc<dyn WeatherSource>,
) -> AppState {
    AppState::new(metrics, weather, fixed_clock())
}

/// Default state: canned metrics, a sunny reading, pinned clock.
pub fn fixed_state() -> AppState {
    state_with(
        Arc::new(StaticMetrics::default()),
        Arc::new(CannedWeather(Ok(Some(sample_weather())))),
    )
}

/// Drives a GET through the router and returns status plus parsed body.
pub async fn get(router: Router, path: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .expect("request build"),
        )
        .await
        .expect("infallible");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    let json = serde_json::from_slice(&bytes).expect("JSON body");
    (status, json)
}

pub fn app_for(state: AppState) -> Router {
    app(state)
}

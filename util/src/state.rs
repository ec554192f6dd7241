//! Application state container shared across Axum route handlers.
//!
//! Holds the collaborators the request handlers depend on (metrics source,
//! weather source, clock). It is cheap to clone and passed into handlers
//! via Axum's `State<T>` extractor.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::metrics::{MetricsSource, SysinfoMetrics};
use crate::weather::{MockWeather, WeatherSource};

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    metrics: Arc<dyn MetricsSource>,
    weather: Arc<dyn WeatherSource>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates a new `AppState` with explicit collaborators.
    ///
    /// Tests use this to substitute canned sources and a fixed clock.
    pub fn new(
        metrics: Arc<dyn MetricsSource>,
        weather: Arc<dyn WeatherSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            metrics,
            weather,
            clock,
        }
    }

    /// Production wiring: sysinfo metrics, the mock weather generator
    /// configured from the environment, and the system clock.
    pub fn init() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self::new(
            Arc::new(SysinfoMetrics),
            Arc::new(MockWeather::from_config(clock.clone())),
            clock,
        )
    }

    /// Returns a shared reference to the metrics source.
    pub fn metrics(&self) -> &dyn MetricsSource {
        self.metrics.as_ref()
    }

    /// Returns a shared reference to the weather source.
    pub fn weather(&self) -> &dyn WeatherSource {
        self.weather.as_ref()
    }

    /// Returns a shared reference to the clock.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

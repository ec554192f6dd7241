//! Weather collaborator.
//!
//! Real weather integration is out of scope; `MockWeather` generates
//! plausible readings and simulates the failure modes a real backend would
//! exhibit, so the API layer's error paths stay honest.

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::failure::Failure;

/// Machine-checkable weather category driving display logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Unknown,
}

impl WeatherKind {
    /// Human-readable label matching the kind; the two are served together
    /// and must stay consistent.
    pub fn condition_label(self) -> &'static str {
        match self {
            WeatherKind::Sunny => "Clear skies",
            WeatherKind::Cloudy => "Overcast",
            WeatherKind::Rainy => "Light rain",
            WeatherKind::Snowy => "Snow flurries",
            WeatherKind::Unknown => "Conditions unknown",
        }
    }
}

/// A weather reading as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherInfo {
    /// Degrees Celsius.
    pub temperature: f64,
    pub condition: String,
    pub weather_type: WeatherKind,
    /// Relative humidity, 0..=100.
    pub humidity: f64,
    /// RFC 3339 timestamp of the reading.
    pub last_updated: String,
}

/// Weather data source. `Ok(None)` means the source answered but has no
/// reading; `Err` means the fetch itself failed.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self) -> Result<Option<WeatherInfo>, Failure>;
}

/// Random weather generator with configurable simulated failure modes.
pub struct MockWeather {
    failure_rate: f64,
    unavailable_rate: f64,
    clock: Arc<dyn Clock>,
}

impl MockWeather {
    pub fn new(failure_rate: f64, unavailable_rate: f64, clock: Arc<dyn Clock>) -> Self {
        Self {
            failure_rate,
            unavailable_rate,
            clock,
        }
    }

    /// Rates taken from the global configuration.
    pub fn from_config(clock: Arc<dyn Clock>) -> Self {
        Self::new(
            crate::config::weather_failure_rate(),
            crate::config::weather_unavailable_rate(),
            clock,
        )
    }

    fn generate(&self) -> WeatherInfo {
        let mut rng = rand::thread_rng();

        let kind = match rng.gen_range(0..4) {
            0 => WeatherKind::Sunny,
            1 => WeatherKind::Cloudy,
            2 => WeatherKind::Rainy,
            _ => WeatherKind::Snowy,
        };
        let temperature = match kind {
            WeatherKind::Sunny => rng.gen_range(15.0..32.0),
            WeatherKind::Cloudy => rng.gen_range(8.0..22.0),
            WeatherKind::Rainy => rng.gen_range(4.0..18.0),
            WeatherKind::Snowy => rng.gen_range(-12.0..2.0),
            WeatherKind::Unknown => rng.gen_range(-10.0..35.0),
        };
        let humidity: f64 = match kind {
            WeatherKind::Rainy | WeatherKind::Snowy => rng.gen_range(60.0..100.0),
            _ => rng.gen_range(20.0..80.0),
        };

        WeatherInfo {
            temperature: (temperature * 10.0_f64).round() / 10.0,
            condition: kind.condition_label().to_string(),
            weather_type: kind,
            humidity: humidity.round(),
            last_updated: self.clock.now().to_rfc3339(),
        }
    }
}

#[async_trait]
impl WeatherSource for MockWeather {
    async fn fetch(&self) -> Result<Option<WeatherInfo>, Failure> {
        let roll: f64 = rand::thread_rng().r#gen();

        if roll < self.failure_rate {
            return Err(Failure::weather_unavailable());
        }
        if roll < self.failure_rate + self.unavailable_rate {
            return Ok(None);
        }
        Ok(Some(self.generate()))
    }
}

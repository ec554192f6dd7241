use serde::Deserialize;
use serde::Serialize;
use util::weather::WeatherInfo;

/// CPU figures as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    /// Average usage across cores, percent, one decimal.
    pub usage: f64,
    pub cores: u64,
}

/// A used/total pair with its derived percentage, for memory and disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageInfo {
    /// Bytes.
    pub total: u64,
    /// Bytes.
    pub used: u64,
    /// Percent, one decimal.
    pub percentage: f64,
}

/// Host metrics payload for `GET /api/system`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub cpu: CpuInfo,
    pub memory: UsageInfo,
    pub disk: UsageInfo,
    /// Seconds.
    pub uptime: u64,
}

/// A pinned shortcut shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickLink {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A short user note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeInfo {
    pub current: String,
    pub timezone: String,
}

/// Aggregate payload for `GET /api/dashboard`.
///
/// `weather` is null when the weather source has no reading or failed;
/// a weather failure degrades the aggregate instead of failing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub system: SystemInfo,
    pub weather: Option<WeatherInfo>,
    pub time: TimeInfo,
    pub quick_links: Vec<QuickLink>,
    pub recent_notes: Vec<Note>,
}

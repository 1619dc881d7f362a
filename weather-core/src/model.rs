use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One 3-hour forecast slot from the upstream feed.
///
/// Timestamps are epoch seconds UTC, exactly as the provider reports them;
/// conversion into civil time happens in [`crate::time`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: i64,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
}

/// A calendar day represented by the first forecast sample seen on that
/// local date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub sample: ForecastSample,
}

/// Current conditions reported by the upstream provider.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    /// Observation time, epoch seconds UTC.
    pub observed_at: i64,
}

/// Full forecast feed for a location, samples in ascending timestamp order.
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    pub city: String,
    pub country: String,
    pub samples: Vec<ForecastSample>,
}

/// Uniform result envelope for tool executions.
///
/// Upstream failures are data here, not transport faults: the HTTP layer
/// returns 200 with `success: false` and a human-readable fallback.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub formatted_response: String,
}

impl ToolOutcome {
    pub fn ok(data: serde_json::Value, formatted_response: String) -> Self {
        Self { success: true, data: Some(data), error: None, formatted_response }
    }

    pub fn failed(error: String, formatted_response: String) -> Self {
        Self { success: false, data: None, error: Some(error), formatted_response }
    }
}

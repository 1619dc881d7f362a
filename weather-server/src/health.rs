//! Health probe with timezone diagnostics.
//!
//! The payload carries enough timezone detail for the debug CLI to verify a
//! deployment's clock handling without extra endpoints.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::Serialize;

use weather_core::time;

use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct TimezoneInfo {
    pub name: String,
    pub formatted_time: String,
    pub offset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_setting: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TimezoneTest {
    pub utc_timestamp: i64,
    pub converted_time: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub timezone: TimezoneInfo,
    pub timezone_test: TimezoneTest,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let zone = &state.config.zone;
    let now = Utc::now();
    let local = time::normalize(now.timestamp(), zone);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: now.to_rfc3339(),
        timezone: TimezoneInfo {
            name: zone.name().to_string(),
            formatted_time: format!("{} {}", local.date, local.time_24h),
            offset: local.utc_offset.clone(),
            env_setting: zone.requested().map(str::to_string),
        },
        timezone_test: TimezoneTest {
            utc_timestamp: now.timestamp(),
            converted_time: format!("{} {} {}", local.date, local.time_12h, local.utc_offset),
        },
    })
}

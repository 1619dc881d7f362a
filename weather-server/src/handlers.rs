//! Tool catalog and dispatch endpoints.
//!
//! Upstream failures are reported inside a 200 envelope with
//! `success: false`; only caller mistakes (unknown tool, missing parameter)
//! and unexpected internal failures map to 4xx/5xx.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use weather_core::{ToolError, ToolOutcome, forecast, render, time};

use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct ToolRequest {
    pub tool_name: String,
    #[serde(default)]
    pub parameters: ToolParameters,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolParameters {
    pub city: Option<String>,
    /// Forecast day count, clamped to 1..=5.
    pub days: Option<u8>,
    /// Reference instant (epoch seconds) for day bucketing; defaults to the
    /// wall clock. Lets callers make reproducible requests.
    pub time: Option<i64>,
}

impl ToolParameters {
    fn city(&self) -> Result<&str, ToolError> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .ok_or(ToolError::MissingParameter("city"))
    }
}

/// `GET /tools` — the tool catalog, in the schema shape automation clients
/// expect.
pub async fn list_tools() -> Json<serde_json::Value> {
    Json(json!({
        "tools": [
            {
                "name": "get_weather",
                "description": "Get current weather information for a city",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "city": {
                            "type": "string",
                            "description": "The name of the city"
                        }
                    },
                    "required": ["city"]
                }
            },
            {
                "name": "get_forecast",
                "description": "Get the multi-day weather forecast for a city",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "city": {
                            "type": "string",
                            "description": "The name of the city"
                        },
                        "days": {
                            "type": "integer",
                            "description": "Number of forecast days (1-5, default 5)",
                            "minimum": 1,
                            "maximum": 5
                        }
                    },
                    "required": ["city"]
                }
            }
        ]
    }))
}

/// `POST /tools/execute` — dispatch to a named tool.
pub async fn execute_tool(
    State(state): State<AppState>,
    Json(request): Json<ToolRequest>,
) -> Response {
    match run_tool(&state, &request).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) if err.is_client_error() => {
            (StatusCode::BAD_REQUEST, Json(json!({ "detail": err.to_string() }))).into_response()
        }
        Err(err) => {
            tracing::error!(tool = %request.tool_name, error = %err, "tool dispatch failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": err.to_string() })))
                .into_response()
        }
    }
}

async fn run_tool(state: &AppState, request: &ToolRequest) -> Result<ToolOutcome, ToolError> {
    match request.tool_name.as_str() {
        "get_weather" => {
            let city = request.parameters.city()?;
            get_weather(state, city).await
        }
        "get_forecast" => {
            let city = request.parameters.city()?;
            get_forecast(state, city, request.parameters.days, request.parameters.time).await
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}

/// Display view of current conditions, mirroring the chat card.
#[derive(Debug, Serialize)]
struct CurrentWeatherView {
    city: String,
    country: String,
    temperature: String,
    feels_like: String,
    condition: String,
    humidity: String,
    pressure: String,
    wind_speed: String,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct ForecastDayView {
    date: String,
    weekday: String,
    temperature: String,
    condition: String,
}

#[derive(Debug, Serialize)]
struct ForecastView {
    city: String,
    country: String,
    days: Vec<ForecastDayView>,
}

pub(crate) async fn get_weather(state: &AppState, city: &str) -> Result<ToolOutcome, ToolError> {
    let zone = &state.config.zone;

    match state.provider.current(city).await {
        Ok(current) => {
            let observed = time::normalize(current.observed_at, zone);
            let formatted = render::render_current(&current, &observed);
            let view = CurrentWeatherView {
                city: current.city.clone(),
                country: current.country.clone(),
                temperature: format!("{:.1}°C", current.temperature_c),
                feels_like: format!("{:.1}°C", current.feels_like_c),
                condition: render::title_case(&current.condition),
                humidity: format!("{}%", current.humidity_pct),
                pressure: format!("{} hPa", current.pressure_hpa),
                wind_speed: format!("{:.1} m/s", current.wind_speed_mps),
                timestamp: observed.local.to_rfc3339(),
            };
            Ok(ToolOutcome::ok(serde_json::to_value(view)?, formatted))
        }
        Err(err) => Ok(ToolOutcome::failed(
            format!("Failed to fetch weather data: {err:#}"),
            format!(
                "Sorry, I couldn't get weather data for {city}. \
                 Please check the city name and try again."
            ),
        )),
    }
}

pub(crate) async fn get_forecast(
    state: &AppState,
    city: &str,
    days: Option<u8>,
    reference_time: Option<i64>,
) -> Result<ToolOutcome, ToolError> {
    let zone = &state.config.zone;
    let days = days.unwrap_or(forecast::DEFAULT_DAYS);

    match state.provider.forecast(city).await {
        Ok(feed) => {
            let today = match reference_time {
                Some(ts) => time::local_date(ts, zone),
                None => time::today(zone),
            };
            let buckets = forecast::bucketize(&feed.samples, days, zone, today);
            let formatted = render::render_forecast(&feed.city, &feed.country, &buckets, zone);
            let view = ForecastView {
                city: feed.city.clone(),
                country: feed.country.clone(),
                days: buckets
                    .iter()
                    .map(|bucket| {
                        let local = time::normalize(bucket.sample.timestamp, zone);
                        ForecastDayView {
                            date: local.date,
                            weekday: local.weekday,
                            temperature: format!("{:.1}°C", bucket.sample.temperature_c),
                            condition: render::title_case(&bucket.sample.condition),
                        }
                    })
                    .collect(),
            };
            Ok(ToolOutcome::ok(serde_json::to_value(view)?, formatted))
        }
        Err(err) => Ok(ToolOutcome::failed(
            format!("Failed to fetch forecast data: {err:#}"),
            format!("Sorry, I couldn't get forecast data for {city}."),
        )),
    }
}

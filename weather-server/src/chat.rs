//! Chat webhook: free-text messages in, formatted weather replies out.
//!
//! This endpoint never fails the transport: an unextractable city or an
//! upstream problem both come back as ordinary replies.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use weather_core::{extract, forecast};

use crate::handlers;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Client-side epoch seconds; used as the bucketing reference when
    /// present.
    pub timestamp: Option<i64>,
    #[serde(default, rename = "preferCurrentWeather")]
    pub prefer_current_weather: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<&'static str>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ChatIntent {
    Current,
    Forecast { days: u8 },
}

const FORECAST_KEYWORDS: &[&str] = &["forecast", "tomorrow", "week", "days", "upcoming", "later"];

/// Decide which tool a chat message is asking for.
///
/// An explicit `preferCurrentWeather` flag always wins over keyword
/// detection; otherwise forecast keywords select the forecast tool, and
/// "tomorrow" narrows it to the one-day, tomorrow-only variant.
pub(crate) fn detect_intent(message: &str, prefer_current: bool) -> ChatIntent {
    if prefer_current {
        return ChatIntent::Current;
    }

    let lower = message.to_lowercase();
    if lower.contains("tomorrow") {
        return ChatIntent::Forecast { days: 1 };
    }
    if FORECAST_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
        return ChatIntent::Forecast { days: forecast::DEFAULT_DAYS };
    }

    ChatIntent::Current
}

pub async fn weather_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let Some(city) = extract::extract_city(&request.message) else {
        return Json(ChatResponse {
            success: true,
            reply: "Please specify a city, for example: \"weather in Paris\".".to_string(),
            city: None,
            tool: None,
        });
    };

    let (tool, outcome) = match detect_intent(&request.message, request.prefer_current_weather) {
        ChatIntent::Current => ("get_weather", handlers::get_weather(&state, &city).await),
        ChatIntent::Forecast { days } => (
            "get_forecast",
            handlers::get_forecast(&state, &city, Some(days), request.timestamp).await,
        ),
    };

    match outcome {
        Ok(outcome) => Json(ChatResponse {
            success: outcome.success,
            reply: outcome.formatted_response,
            city: Some(city),
            tool: Some(tool),
        }),
        Err(err) => {
            tracing::error!(tool, error = %err, "webhook tool execution failed");
            Json(ChatResponse {
                success: false,
                reply: format!("Sorry, something went wrong handling that request: {err}"),
                city: Some(city),
                tool: Some(tool),
            })
        }
    }
}

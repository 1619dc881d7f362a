use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use weather_core::{Config, WeatherProvider};

use crate::{chat, handlers, health};

/// Shared per-process state: the immutable configuration and the upstream
/// provider, both read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn WeatherProvider>,
}

/// Build the service router. CORS is permissive: the gateway sits behind
/// automation clients on other origins.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/tools", get(handlers::list_tools))
        .route("/tools/execute", post(handlers::execute_tool))
        .route("/webhook/weather-chat", post(chat::weather_chat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use weather_core::{CurrentConditions, Forecast, ForecastSample, TimeZoneSpec};

    // 2024-01-01T00:00:00Z, a Monday.
    const REF: i64 = 1_704_067_200;

    #[derive(Debug, Default)]
    struct StubProvider {
        current: Option<CurrentConditions>,
        forecast: Option<Forecast>,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn current(&self, _city: &str) -> anyhow::Result<CurrentConditions> {
            self.current.clone().ok_or_else(|| anyhow::anyhow!("upstream unavailable"))
        }

        async fn forecast(&self, _city: &str) -> anyhow::Result<Forecast> {
            self.forecast.clone().ok_or_else(|| anyhow::anyhow!("upstream unavailable"))
        }
    }

    fn paris_current() -> CurrentConditions {
        CurrentConditions {
            city: "Paris".into(),
            country: "FR".into(),
            temperature_c: 24.5,
            feels_like_c: 25.1,
            condition: "scattered clouds".into(),
            humidity_pct: 60,
            pressure_hpa: 1014,
            wind_speed_mps: 4.2,
            observed_at: REF,
        }
    }

    fn paris_forecast() -> Forecast {
        // One 06:00 sample per day for three consecutive days.
        let samples = (0..3)
            .map(|day| ForecastSample {
                timestamp: REF + day * 86_400 + 6 * 3_600,
                temperature_c: 10.0 + day as f64,
                feels_like_c: 9.0,
                condition: "light rain".into(),
                humidity_pct: 70,
                pressure_hpa: 1010,
            })
            .collect();
        Forecast { city: "Paris".into(), country: "FR".into(), samples }
    }

    fn app(zone: &str, provider: StubProvider) -> Router {
        let config = weather_core::Config {
            api_key: "test-key".into(),
            zone: TimeZoneSpec::resolve(Some(zone)),
            bind_addr: "127.0.0.1:0".parse().expect("test addr"),
        };
        router(AppState { config: Arc::new(config), provider: Arc::new(provider) })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        split(response).await
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        let response = app.oneshot(request).await.expect("response");
        split(response).await
    }

    async fn split(response: axum::response::Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_reports_zone_and_conversion_test() {
        let (status, body) = get_json(app("America/New_York", StubProvider::default()), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["timezone"]["name"], "America/New_York");
        assert_eq!(body["timezone"]["env_setting"], "America/New_York");
        let offset = body["timezone"]["offset"].as_str().expect("offset string");
        assert!(offset == "-04:00" || offset == "-05:00", "got {offset}");
        assert!(body["timezone_test"]["utc_timestamp"].is_i64());
    }

    #[tokio::test]
    async fn tools_catalog_lists_both_tools() {
        let (status, body) = get_json(app("UTC", StubProvider::default()), "/tools").await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> =
            body["tools"].as_array().expect("array").iter().filter_map(|t| t["name"].as_str()).collect();
        assert_eq!(names, vec!["get_weather", "get_forecast"]);
    }

    #[tokio::test]
    async fn unknown_tool_is_a_400() {
        let (status, body) = post_json(
            app("UTC", StubProvider::default()),
            "/tools/execute",
            json!({"tool_name": "get_tides", "parameters": {"city": "Paris"}}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().expect("detail").contains("Unknown tool"));
    }

    #[tokio::test]
    async fn missing_city_is_a_400() {
        let (status, body) = post_json(
            app("UTC", StubProvider::default()),
            "/tools/execute",
            json!({"tool_name": "get_weather", "parameters": {}}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().expect("detail").contains("city"));
    }

    #[tokio::test]
    async fn get_weather_returns_success_envelope() {
        let provider = StubProvider { current: Some(paris_current()), ..Default::default() };
        let (status, body) = post_json(
            app("UTC", provider),
            "/tools/execute",
            json!({"tool_name": "get_weather", "parameters": {"city": "Paris"}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["city"], "Paris");
        assert_eq!(body["data"]["temperature"], "24.5°C");
        assert!(
            body["formatted_response"]
                .as_str()
                .expect("text")
                .contains("Current Weather for Paris, FR")
        );
    }

    #[tokio::test]
    async fn upstream_failure_is_200_with_failure_envelope() {
        let (status, body) = post_json(
            app("UTC", StubProvider::default()),
            "/tools/execute",
            json!({"tool_name": "get_weather", "parameters": {"city": "Paris"}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().expect("error").contains("Failed to fetch weather data"));
        assert!(body["formatted_response"].as_str().expect("text").starts_with("Sorry"));
    }

    #[tokio::test]
    async fn forecast_honors_days_and_reference_time() {
        let provider = StubProvider { forecast: Some(paris_forecast()), ..Default::default() };
        let (status, body) = post_json(
            app("UTC", provider),
            "/tools/execute",
            json!({
                "tool_name": "get_forecast",
                "parameters": {"city": "Paris", "days": 2, "time": REF}
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let days = body["data"]["days"].as_array().expect("days");
        assert_eq!(days.len(), 2);
        assert_eq!(days[0]["date"], "2024-01-01");
        assert_eq!(days[1]["date"], "2024-01-02");
    }

    #[tokio::test]
    async fn webhook_without_city_asks_for_one() {
        let (status, body) = post_json(
            app("UTC", StubProvider::default()),
            "/webhook/weather-chat",
            json!({"message": "what's the weather"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["reply"].as_str().expect("reply").contains("specify a city"));
        assert!(body.get("tool").is_none());
    }

    #[tokio::test]
    async fn webhook_explicit_flag_overrides_forecast_keywords() {
        let provider = StubProvider { current: Some(paris_current()), ..Default::default() };
        let (_, body) = post_json(
            app("UTC", provider),
            "/webhook/weather-chat",
            json!({"message": "forecast for Paris this week", "preferCurrentWeather": true}),
        )
        .await;

        assert_eq!(body["tool"], "get_weather");
        assert!(body["reply"].as_str().expect("reply").contains("Current Weather"));
    }

    #[tokio::test]
    async fn webhook_tomorrow_requests_a_single_future_day() {
        let provider = StubProvider { forecast: Some(paris_forecast()), ..Default::default() };
        let (_, body) = post_json(
            app("UTC", provider),
            "/webhook/weather-chat",
            json!({"message": "weather in Paris tomorrow", "timestamp": REF}),
        )
        .await;

        assert_eq!(body["tool"], "get_forecast");
        let reply = body["reply"].as_str().expect("reply");
        assert!(reply.contains("1-Day Weather Forecast"), "got: {reply}");
        assert!(reply.contains("2024-01-02"), "got: {reply}");
    }
}

//! Binary crate for the weather gateway HTTP server.
//!
//! Startup sequence: logging, environment configuration (a missing API key
//! is fatal), a timezone diagnostics banner, then bind and serve.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use weather_core::provider::OpenWeatherProvider;
use weather_core::{Config, time};

mod chat;
mod handlers;
mod health;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    log_timezone_diagnostics(&config);

    let state = routes::AppState {
        provider: Arc::new(OpenWeatherProvider::new(config.api_key.clone())),
        config: Arc::new(config),
    };
    let bind_addr = state.config.bind_addr;

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "weather gateway listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Startup banner: configured zone, current UTC vs local time, offset, and
/// a round-trip conversion self-test against the wall clock.
fn log_timezone_diagnostics(config: &Config) {
    let zone = &config.zone;
    let now = Utc::now();
    let local = time::normalize(now.timestamp(), zone);

    tracing::info!(zone = zone.name(), "timezone configuration");
    tracing::info!(utc = %now.format("%Y-%m-%d %H:%M:%S UTC"), "current UTC time");
    tracing::info!(
        local = %format!("{} {}", local.date, local.time_24h),
        offset = %local.utc_offset,
        "current local time"
    );
    tracing::info!(
        utc_timestamp = now.timestamp(),
        converted = %format!("{} {}", local.date, local.time_12h),
        "timestamp conversion test"
    );
}

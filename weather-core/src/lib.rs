//! Core library for the weather gateway.
//!
//! This crate defines:
//! - Configuration handling (environment-derived, immutable after startup)
//! - Timezone-aware timestamp normalization
//! - Day-bucketing of 3-hour forecast samples
//! - Best-effort city extraction from free text
//! - Abstraction over the upstream weather provider
//!
//! It is used by `weather-server` and `weather-debug`, but can also be reused
//! by other binaries or services.

pub mod config;
pub mod error;
pub mod extract;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod render;
pub mod time;

pub use config::Config;
pub use error::ToolError;
pub use model::{CurrentConditions, DayBucket, Forecast, ForecastSample, ToolOutcome};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use time::{LocalTimestamp, TimeZoneSpec};

use std::fmt::Debug;

use async_trait::async_trait;

use crate::model::{CurrentConditions, Forecast};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Abstraction over the upstream weather data source.
///
/// One production implementation exists ([`OpenWeatherProvider`]); the trait
/// is the seam the server uses for dependency injection and tests use for
/// stubbing. No retry semantics: a failed call surfaces to the caller.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city.
    async fn current(&self, city: &str) -> anyhow::Result<CurrentConditions>;

    /// The raw 5-day/3-hour forecast feed for a city, in ascending
    /// timestamp order.
    async fn forecast(&self, city: &str) -> anyhow::Result<Forecast>;
}

use std::net::SocketAddr;

use anyhow::{Context, Result};

use crate::time::TimeZoneSpec;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";

/// Process configuration, read from the environment once at startup and
/// passed explicitly to request handlers. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenWeatherMap API credential.
    pub api_key: String,
    /// Zone used for every timestamp shown to users.
    pub zone: TimeZoneSpec,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// A missing `OPENWEATHER_API_KEY` is fatal. An invalid `TIMEZONE`
    /// resolves to UTC with a logged warning.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("OPENWEATHER_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("OPENWEATHER_API_KEY environment variable not set")?;

        let zone = TimeZoneSpec::resolve(lookup("TIMEZONE").as_deref());

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("Invalid BIND_ADDR value: {bind_addr}"))?;

        Ok(Self { api_key, zone, bind_addr })
    }
}

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;

use weather_core::time::{self, TimeZoneSpec};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-debug", version, about = "Weather gateway debugging tool")]
pub struct Cli {
    /// Server health endpoint URL.
    #[arg(long, default_value = "http://localhost:3001/health")]
    pub server: String,

    /// Check system timezone.
    #[arg(long)]
    pub system: bool,

    /// Check the TIMEZONE environment setting.
    #[arg(long)]
    pub env: bool,

    /// List common timezone options.
    #[arg(long)]
    pub list: bool,

    /// Test timestamp conversion.
    #[arg(long)]
    pub convert: bool,

    /// Check server health.
    #[arg(long)]
    pub health: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        // No specific flags means run every check.
        let all = !(self.system || self.env || self.list || self.convert || self.health);

        println!("Weather gateway timezone debugging tool");
        println!("---------------------------------------");

        if all || self.system {
            check_system_timezone();
        }
        if all || self.env {
            check_env_timezone();
        }
        if all || self.list {
            list_common_timezones();
        }
        if all || self.convert {
            test_timestamp_conversion();
        }
        if all || self.health {
            check_server_health(&self.server).await;
        }

        Ok(())
    }
}

fn print_header(title: &str) {
    println!("\n{}", "=".repeat(50));
    println!("     {title}");
    println!("{}", "=".repeat(50));
}

fn check_system_timezone() {
    print_header("SYSTEM TIMEZONE INFORMATION");

    let local_now = Local::now();
    let utc_now = Utc::now();

    println!("Current system time: {}", local_now.format("%Y-%m-%d %H:%M:%S"));
    println!("Current UTC time: {}", utc_now.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("System UTC offset: {}", local_now.format("%:z"));
}

fn check_env_timezone() {
    print_header("ENVIRONMENT VARIABLE CHECK");

    let Ok(name) = std::env::var("TIMEZONE") else {
        println!("WARNING: TIMEZONE environment variable is not set.");
        println!("The server will default to UTC.");
        return;
    };

    println!("TIMEZONE environment variable: {name}");
    match TimeZoneSpec::parse(&name) {
        Ok(zone) => {
            let now = time::now_in(&zone);
            println!("✓ Valid timezone: {}", zone.name());
            println!("Current time in {}: {}", zone.name(), now.format("%Y-%m-%d %H:%M:%S %Z"));
            println!("UTC offset: {}", now.format("%:z"));
        }
        Err(_) => {
            println!("✗ ERROR: Invalid timezone: {name}");
            println!("Please use a valid IANA timezone identifier.");
        }
    }
}

fn list_common_timezones() {
    print_header("COMMON TIMEZONE OPTIONS");

    let common_zones = [
        ("Asia/Kolkata", "India"),
        ("America/New_York", "US Eastern"),
        ("America/Chicago", "US Central"),
        ("America/Denver", "US Mountain"),
        ("America/Los_Angeles", "US Pacific"),
        ("Europe/London", "United Kingdom"),
        ("Europe/Berlin", "Central Europe"),
        ("Europe/Paris", "France"),
        ("Asia/Tokyo", "Japan"),
        ("Asia/Singapore", "Singapore"),
        ("Australia/Sydney", "Eastern Australia"),
    ];

    println!("Here are some common timezone options you can use:");
    println!("\n{:<22} {:<24} Region", "Timezone", "Current Time");
    println!("{}", "-".repeat(70));

    for (name, region) in common_zones {
        match TimeZoneSpec::parse(name) {
            Ok(zone) => {
                let now = time::now_in(&zone);
                println!("{:<22} {:<24} {}", name, now.format("%Y-%m-%d %H:%M:%S"), region);
            }
            Err(_) => println!("{name:<22} [Error getting time]      {region}"),
        }
    }

    println!("\nTo use one of these timezones, set in the environment:");
    println!("TIMEZONE=Asia/Kolkata  # Replace with your desired timezone");
}

fn test_timestamp_conversion() {
    print_header("TIMESTAMP CONVERSION TEST");

    let utc_timestamp = Utc::now().timestamp();
    println!("Sample UTC timestamp: {utc_timestamp}");

    // Same resolution path as the server, including the UTC fallback.
    let zone = TimeZoneSpec::resolve(std::env::var("TIMEZONE").ok().as_deref());
    let local = time::normalize(utc_timestamp, &zone);

    println!("\nConverted to {}: {} {}", zone.name(), local.date, local.time_24h);
    println!("12-hour format: {}", local.time_12h);
    println!("Weekday: {}", local.weekday);
    println!("Offset from UTC: {}", local.utc_offset);

    println!("\nThis mirrors how the server converts OpenWeather timestamps.");
}

async fn check_server_health(url: &str) {
    print_header("SERVER HEALTH CHECK");

    match fetch_health(url).await {
        Ok(data) => {
            let text = |value: &serde_json::Value| value.as_str().unwrap_or("unknown").to_string();

            println!("✓ Server is running");
            println!("\nServer timezone: {}", text(&data["timezone"]["name"]));
            println!("Server time: {}", text(&data["timezone"]["formatted_time"]));
            println!("UTC offset: {}", text(&data["timezone"]["offset"]));

            if let Some(env_setting) = data["timezone"]["env_setting"].as_str() {
                println!("Environment setting: {env_setting}");
            }

            if let Some(test) = data.get("timezone_test") {
                println!("\nTimestamp conversion test:");
                println!("UTC timestamp: {}", test["utc_timestamp"]);
                println!("Converted time: {}", text(&test["converted_time"]));
            }
        }
        Err(err) => {
            println!("✗ Could not connect to the weather server");
            println!("  Error: {err:#}");
            println!("\nMake sure the server is running and reachable at {url}");
        }
    }
}

async fn fetch_health(url: &str) -> Result<serde_json::Value> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .context("Failed to build HTTP client")?;

    let response = client.get(url).send().await.context("Health request failed")?;
    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("Server returned status code: {status}");
    }

    response.json().await.context("Failed to parse health response")
}

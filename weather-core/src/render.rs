//! Human-readable text blocks for chat-facing responses.
//!
//! The exact shapes (emoji labels, "Data updated" footer) are part of the
//! service's outward contract with its chat integrations.

use crate::model::{CurrentConditions, DayBucket};
use crate::time::{self, LocalTimestamp, TimeZoneSpec};

/// Title-case a condition description: "scattered clouds" -> "Scattered Clouds".
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Emoji card for current conditions; `observed` is the observation time
/// already converted into the configured zone.
pub fn render_current(current: &CurrentConditions, observed: &LocalTimestamp) -> String {
    format!(
        "🌤️ Current Weather for {city}, {country}:\n\n\
         🌡️ Temperature: {temp:.1}°C (feels like {feels:.1}°C)\n\
         ☁️ Condition: {condition}\n\
         💧 Humidity: {humidity}%\n\
         🌪️ Pressure: {pressure} hPa\n\
         💨 Wind Speed: {wind:.1} m/s\n\n\
         Data updated: {date} {time}",
        city = current.city,
        country = current.country,
        temp = current.temperature_c,
        feels = current.feels_like_c,
        condition = title_case(&current.condition),
        humidity = current.humidity_pct,
        pressure = current.pressure_hpa,
        wind = current.wind_speed_mps,
        date = observed.date,
        time = observed.time_24h,
    )
}

/// Day-per-line forecast list. Dates and weekdays are local to `zone`.
pub fn render_forecast(
    city: &str,
    country: &str,
    buckets: &[DayBucket],
    zone: &TimeZoneSpec,
) -> String {
    let mut text =
        format!("📅 {}-Day Weather Forecast for {city}, {country}:\n\n", buckets.len());

    for bucket in buckets {
        let local = time::normalize(bucket.sample.timestamp, zone);
        text.push_str(&format!(
            "🗓️ {weekday} ({date}): {temp:.1}°C, {condition}\n",
            weekday = local.weekday,
            date = local.date,
            temp = bucket.sample.temperature_c,
            condition = title_case(&bucket.sample.condition),
        ));
    }

    text
}

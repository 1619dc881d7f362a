use std::str::FromStr;

use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// A named civil time zone, resolved once at process startup.
///
/// Invalid or missing zone names resolve to UTC; the originally requested
/// name is kept so diagnostics can report what the environment asked for.
#[derive(Debug, Clone)]
pub struct TimeZoneSpec {
    tz: Tz,
    requested: Option<String>,
}

impl TimeZoneSpec {
    pub fn utc() -> Self {
        Self { tz: Tz::UTC, requested: None }
    }

    /// Resolve a zone name, falling back to UTC when the name is absent or
    /// not a known IANA identifier. Never fails; the fallback is logged.
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            None => {
                tracing::warn!("TIMEZONE environment variable not set, defaulting to UTC");
                Self::utc()
            }
            Some(raw) => match Tz::from_str(raw) {
                Ok(tz) => Self { tz, requested: Some(raw.to_string()) },
                Err(_) => {
                    tracing::warn!(zone = raw, "invalid timezone, falling back to UTC");
                    Self { tz: Tz::UTC, requested: Some(raw.to_string()) }
                }
            },
        }
    }

    /// Strict variant of [`resolve`](Self::resolve) for callers that want
    /// the error instead of the UTC fallback (the debug CLI).
    pub fn parse(name: &str) -> Result<Self> {
        let tz = Tz::from_str(name).map_err(|_| anyhow!("Invalid timezone name: {name}"))?;
        Ok(Self { tz, requested: Some(name.to_string()) })
    }

    /// Canonical IANA name of the bound zone.
    pub fn name(&self) -> &str {
        self.tz.name()
    }

    /// The name the environment asked for, which may differ from
    /// [`name`](Self::name) after a fallback.
    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }
}

/// Display-ready conversion of a UTC instant into a civil time zone.
#[derive(Debug, Clone, Serialize)]
pub struct LocalTimestamp {
    /// The converted instant, offset-aware.
    pub local: DateTime<Tz>,
    /// Weekday name, e.g. "Thursday".
    pub weekday: String,
    /// Local calendar date, YYYY-MM-DD.
    pub date: String,
    /// 12-hour clock, e.g. "08:00 AM".
    pub time_12h: String,
    /// 24-hour clock, e.g. "08:00:00".
    pub time_24h: String,
    /// Offset from UTC, ±HH:MM.
    pub utc_offset: String,
}

/// Convert an epoch-seconds UTC timestamp into the zone's civil time.
///
/// Total once a zone is bound: timestamps outside chrono's representable
/// range collapse to the epoch rather than failing.
pub fn normalize(timestamp: i64, zone: &TimeZoneSpec) -> LocalTimestamp {
    let utc = DateTime::from_timestamp(timestamp, 0).unwrap_or_default();
    let local = utc.with_timezone(&zone.tz());

    LocalTimestamp {
        weekday: local.format("%A").to_string(),
        date: local.format("%Y-%m-%d").to_string(),
        time_12h: local.format("%I:%M %p").to_string(),
        time_24h: local.format("%H:%M:%S").to_string(),
        utc_offset: local.format("%:z").to_string(),
        local,
    }
}

/// Local calendar date of an epoch-seconds timestamp.
pub fn local_date(timestamp: i64, zone: &TimeZoneSpec) -> NaiveDate {
    DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .with_timezone(&zone.tz())
        .date_naive()
}

/// Current calendar date in the zone.
pub fn today(zone: &TimeZoneSpec) -> NaiveDate {
    Utc::now().with_timezone(&zone.tz()).date_naive()
}

/// Current wall-clock time in the zone.
pub fn now_in(zone: &TimeZoneSpec) -> DateTime<Tz> {
    Utc::now().with_timezone(&zone.tz())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-07-04T12:00:00Z
    const INDEPENDENCE_DAY_NOON: i64 = 1_720_094_400;

    #[test]
    fn normalize_new_york_summer_uses_dst_offset() {
        let zone = TimeZoneSpec::resolve(Some("America/New_York"));
        let local = normalize(INDEPENDENCE_DAY_NOON, &zone);

        assert_eq!(local.date, "2024-07-04");
        assert_eq!(local.weekday, "Thursday");
        assert_eq!(local.time_24h, "08:00:00");
        assert_eq!(local.time_12h, "08:00 AM");
        assert_eq!(local.utc_offset, "-04:00");
    }

    #[test]
    fn normalize_kolkata_half_hour_offset() {
        let zone = TimeZoneSpec::resolve(Some("Asia/Kolkata"));
        let local = normalize(INDEPENDENCE_DAY_NOON, &zone);

        assert_eq!(local.utc_offset, "+05:30");
        assert_eq!(local.time_24h, "17:30:00");
        assert_eq!(local.time_12h, "05:30 PM");
    }

    #[test]
    fn normalize_round_trips_through_reported_offset() {
        for name in ["UTC", "America/New_York", "Asia/Kolkata", "Australia/Sydney"] {
            let zone = TimeZoneSpec::resolve(Some(name));
            let local = normalize(INDEPENDENCE_DAY_NOON, &zone);

            // The offset-aware datetime must still denote the same instant.
            assert_eq!(local.local.timestamp(), INDEPENDENCE_DAY_NOON, "zone {name}");

            // Reconstructing UTC from the wall clock and the reported offset
            // must land on the input instant as well.
            let (sign, rest) = local.utc_offset.split_at(1);
            let (hours, minutes) = rest.split_once(':').expect("offset must be ±HH:MM");
            let offset_secs = (hours.parse::<i64>().unwrap() * 3600
                + minutes.parse::<i64>().unwrap() * 60)
                * if sign == "-" { -1 } else { 1 };
            let wall = local.local.naive_local().and_utc().timestamp();
            assert_eq!(wall - offset_secs, INDEPENDENCE_DAY_NOON, "zone {name}");
        }
    }

    #[test]
    fn local_date_crosses_midnight_westward() {
        // 2024-01-02T03:00:00Z is still Jan 1 in New York (22:00 local).
        let zone = TimeZoneSpec::resolve(Some("America/New_York"));
        let date = local_date(1_704_164_400, &zone);
        assert_eq!(date.to_string(), "2024-01-01");
    }

    #[test]
    fn invalid_zone_falls_back_to_utc_and_keeps_request() {
        let zone = TimeZoneSpec::resolve(Some("Not/AZone"));
        assert_eq!(zone.name(), "UTC");
        assert_eq!(zone.requested(), Some("Not/AZone"));
    }

    #[test]
    fn missing_zone_defaults_to_utc() {
        let zone = TimeZoneSpec::resolve(None);
        assert_eq!(zone.name(), "UTC");
        assert_eq!(zone.requested(), None);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = TimeZoneSpec::parse("Mars/Olympus_Mons").unwrap_err();
        assert!(err.to_string().contains("Invalid timezone name"));

        let zone = TimeZoneSpec::parse("Europe/London").expect("valid zone");
        assert_eq!(zone.name(), "Europe/London");
    }
}

use chrono::NaiveDate;

use crate::model::{DayBucket, ForecastSample};
use crate::time::{self, TimeZoneSpec};

/// Default and maximum day counts match the upstream 5-day/3-hour feed.
pub const DEFAULT_DAYS: u8 = 5;
pub const MAX_DAYS: u8 = 5;

/// Reduce 3-hour forecast samples to at most `days` calendar-day buckets in
/// `zone`, keeping the first sample seen for each distinct local date.
///
/// `days` is clamped to 1..=5. `days == 1` is tomorrow-only mode: samples
/// dated `today` are skipped so the single bucket is never the current day.
/// Fewer distinct dates than `days` yields fewer buckets. Out-of-order input
/// is tolerated; the output is always sorted by date ascending.
pub fn bucketize(
    samples: &[ForecastSample],
    days: u8,
    zone: &TimeZoneSpec,
    today: NaiveDate,
) -> Vec<DayBucket> {
    let days = days.clamp(1, MAX_DAYS) as usize;
    let tomorrow_only = days == 1;

    let mut buckets: Vec<DayBucket> = Vec::with_capacity(days);
    for sample in samples {
        let date = time::local_date(sample.timestamp, zone);
        if tomorrow_only && date == today {
            continue;
        }
        if buckets.iter().any(|b| b.date == date) {
            continue;
        }
        buckets.push(DayBucket { date, sample: sample.clone() });
        if buckets.len() == days {
            break;
        }
    }

    buckets.sort_by_key(|b| b.date);
    buckets
}

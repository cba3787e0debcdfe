// ── Relative time labels ──

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::model::EpochMillis;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> EpochMillis {
    Utc::now().timestamp_millis()
}

/// Human label for how long ago `timestamp` was, relative to `now`.
///
/// Under a minute reads "Just now", under an hour "N minutes ago",
/// under a day "N hours ago"; anything older shows the calendar date
/// in `tz`.
pub fn relative_label<Tz: TimeZone>(timestamp: EpochMillis, now: EpochMillis, tz: &Tz) -> String {
    let diff = now - timestamp;
    if diff < MINUTE_MS {
        "Just now".into()
    } else if diff < HOUR_MS {
        format!("{} minutes ago", diff / MINUTE_MS)
    } else if diff < DAY_MS {
        format!("{} hours ago", diff / HOUR_MS)
    } else {
        tz.timestamp_millis_opt(timestamp)
            .single()
            .map_or_else(
                || timestamp.to_string(),
                |dt| dt.date_naive().format("%Y-%m-%d").to_string(),
            )
    }
}

/// [`relative_label`] against the local clock and time zone.
pub fn relative_label_local(timestamp: EpochMillis) -> String {
    relative_label(timestamp, now_millis(), &Local)
}

/// Absolute local timestamp for tables and detail views.
pub fn format_local(timestamp: EpochMillis) -> String {
    DateTime::from_timestamp_millis(timestamp).map_or_else(
        || timestamp.to_string(),
        |dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const NOW: i64 = 1_715_688_000_000; // 2024-05-14T12:00:00Z

    #[test]
    fn labels() {
        assert_eq!(relative_label(NOW - 30_000, NOW, &Utc), "Just now");
        assert_eq!(relative_label(NOW, NOW, &Utc), "Just now");
        assert_eq!(relative_label(NOW - 5 * MINUTE_MS, NOW, &Utc), "5 minutes ago");
        assert_eq!(relative_label(NOW - 59 * MINUTE_MS, NOW, &Utc), "59 minutes ago");
        assert_eq!(relative_label(NOW - 3 * HOUR_MS, NOW, &Utc), "3 hours ago");
        assert_eq!(relative_label(NOW - 2 * DAY_MS, NOW, &Utc), "2024-05-12");
    }

    #[test]
    fn older_dates_use_the_given_zone() {
        let tz = chrono::FixedOffset::west_opt(5 * 3600).unwrap();
        // 2024-05-12T02:00Z is still May 11 at UTC-5.
        let ts = NOW - 2 * DAY_MS - 10 * HOUR_MS;
        assert_eq!(relative_label(ts, NOW, &tz), "2024-05-11");
        assert_eq!(relative_label(ts, NOW, &Utc), "2024-05-12");
    }

    #[test]
    fn future_timestamps_read_as_now() {
        assert_eq!(relative_label(NOW + HOUR_MS, NOW, &Utc), "Just now");
    }
}

// ── Derived alert metrics ──
//
// Full pass over the collection on every call. Collections are small;
// nothing is cached or updated incrementally.

use std::collections::HashSet;

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::model::{Alert, AlertSeverity, EpochMillis};

/// Summary counters shown above the alert lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertMetrics {
    pub active_count: usize,
    pub high_priority_active_count: usize,
    pub unacknowledged_count: usize,
    pub resolved_today_count: usize,
    pub category_count: usize,
}

impl AlertMetrics {
    /// Compute against the local calendar.
    pub fn compute(alerts: &[Alert]) -> Self {
        Self::compute_at(alerts, &Local::now())
    }

    /// Compute with "today" taken from `now` in its own time zone.
    pub fn compute_at<Tz: TimeZone>(alerts: &[Alert], now: &DateTime<Tz>) -> Self {
        Self {
            active_count: active_count(alerts),
            high_priority_active_count: high_priority_active_count(alerts),
            unacknowledged_count: unacknowledged_count(alerts),
            resolved_today_count: resolved_today_count(alerts, now),
            category_count: category_count(alerts),
        }
    }
}

pub fn active_count(alerts: &[Alert]) -> usize {
    alerts.iter().filter(|a| a.is_active()).count()
}

pub fn high_priority_active_count(alerts: &[Alert]) -> usize {
    alerts
        .iter()
        .filter(|a| a.is_active() && a.severity == AlertSeverity::High)
        .count()
}

/// Counts both active and resolved records.
pub fn unacknowledged_count(alerts: &[Alert]) -> usize {
    alerts.iter().filter(|a| !a.acknowledged).count()
}

/// Resolved alerts whose resolution (or creation, if missing) falls on
/// the same calendar day as `now`, in `now`'s time zone.
pub fn resolved_today_count<Tz: TimeZone>(alerts: &[Alert], now: &DateTime<Tz>) -> usize {
    let today = now.date_naive();
    let tz = now.timezone();
    alerts
        .iter()
        .filter(|a| a.is_resolved())
        .filter(|a| day_of(&tz, a.resolved_or_created()) == Some(today))
        .count()
}

/// Distinct raw `type` tags, unknown ones included.
pub fn category_count(alerts: &[Alert]) -> usize {
    alerts.iter().map(|a| a.kind.as_str()).collect::<HashSet<_>>().len()
}

fn day_of<Tz: TimeZone>(tz: &Tz, millis: EpochMillis) -> Option<chrono::NaiveDate> {
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.date_naive())
}

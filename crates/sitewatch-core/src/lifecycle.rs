// ── Alert lifecycle ──
//
// Pure transformations over an alert collection. Nothing here stores
// or broadcasts; callers own the resulting collection.
//
// Transitions: active -> (acknowledged) -> resolved. Resolution is
// terminal and forces acknowledgement. Unknown ids are a silent no-op;
// `AlertStore` layers a strict not-found signal on top.

use std::cmp::Reverse;

use chrono::Utc;

use crate::model::{Alert, AlertStatus, EpochMillis};

/// Mark the matching alert acknowledged. Status is never touched.
pub fn acknowledge(alerts: &[Alert], id: &str) -> Vec<Alert> {
    alerts
        .iter()
        .map(|a| {
            if a.id == id {
                acknowledged(a)
            } else {
                a.clone()
            }
        })
        .collect()
}

/// Resolve the matching alert at the current wall-clock time.
pub fn resolve(alerts: &[Alert], id: &str) -> Vec<Alert> {
    resolve_at(alerts, id, Utc::now().timestamp_millis())
}

/// Resolve the matching alert at `now`.
///
/// Already-resolved alerts are left as they are, so repeated calls keep
/// the first `resolved_at`.
pub fn resolve_at(alerts: &[Alert], id: &str, now: EpochMillis) -> Vec<Alert> {
    alerts
        .iter()
        .map(|a| {
            if a.id == id {
                resolved(a, now)
            } else {
                a.clone()
            }
        })
        .collect()
}

/// Split into `(active, resolved)`, keeping input order within each side.
pub fn partition(alerts: &[Alert]) -> (Vec<Alert>, Vec<Alert>) {
    alerts.iter().cloned().partition(Alert::is_active)
}

/// Order active alerts for display: severity (high first), then
/// unacknowledged before acknowledged, then newest first. Stable.
pub fn sort_active(active: &[Alert]) -> Vec<Alert> {
    let mut out = active.to_vec();
    out.sort_by_key(|a| (a.severity.rank(), a.acknowledged, Reverse(a.timestamp)));
    out
}

/// Order resolved alerts newest resolution first. Stable.
pub fn sort_resolved(resolved: &[Alert]) -> Vec<Alert> {
    let mut out = resolved.to_vec();
    out.sort_by_key(|a| Reverse(a.resolved_or_created()));
    out
}

// ── Single-record transitions ───────────────────────────────────────

pub(crate) fn acknowledged(alert: &Alert) -> Alert {
    Alert {
        acknowledged: true,
        ..alert.clone()
    }
}

pub(crate) fn resolved(alert: &Alert, now: EpochMillis) -> Alert {
    if alert.is_resolved() {
        return alert.clone();
    }
    Alert {
        status: AlertStatus::Resolved,
        acknowledged: true,
        // A creation instant ahead of our clock must not yield a
        // resolution that precedes it.
        resolved_at: Some(now.max(alert.timestamp)),
        ..alert.clone()
    }
}

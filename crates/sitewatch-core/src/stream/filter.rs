// ── Filter predicates for alert snapshots ──
//
// Used by front ends to narrow a snapshot without re-querying the source.

use crate::model::{Alert, AlertSeverity, AlertType};

/// Filter predicate for alert collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertFilter {
    Unacknowledged,
    ByType(AlertType),
    BySeverity(AlertSeverity),
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        match self {
            Self::Unacknowledged => !alert.acknowledged,
            Self::ByType(t) => alert.kind == *t,
            Self::BySeverity(s) => alert.severity == *s,
        }
    }

    /// Keep alerts matching every filter, preserving order. An empty
    /// filter set keeps everything.
    pub fn apply_all(filters: &[Self], alerts: Vec<Alert>) -> Vec<Alert> {
        alerts
            .into_iter()
            .filter(|a| filters.iter().all(|f| f.matches(a)))
            .collect()
    }
}

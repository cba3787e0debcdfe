// ── Central alert store ──
//
// One instance per operator view, holding the alert collection and the
// alert settings.
// Mutations are broadcast to subscribers via `watch` channels.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use super::collection::AlertCollection;
use crate::error::CoreError;
use crate::lifecycle;
use crate::metrics::AlertMetrics;
use crate::model::{
    Alert, AlertSettings, BoundedMetric, EpochMillis, NotificationChannel, NotificationChannels,
    ThresholdMetric, ThresholdSettings,
};
use crate::stream::AlertStream;
use crate::time::now_millis;

/// Outcome of a strict lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertUpdate {
    /// The record after the transition.
    pub alert: Alert,
    /// `false` when the record already was in the requested state.
    pub changed: bool,
}

/// Reactive store for the alert collection and its settings.
pub struct AlertStore {
    pub(crate) alerts: AlertCollection,
    settings: watch::Sender<AlertSettings>,
    pub(crate) last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl AlertStore {
    pub fn new() -> Self {
        Self::with_settings(AlertSettings::default())
    }

    pub fn with_settings(settings: AlertSettings) -> Self {
        let (settings, _) = watch::channel(settings);
        let (last_refresh, _) = watch::channel(None);
        Self {
            alerts: AlertCollection::new(),
            settings,
            last_refresh,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<Vec<Alert>> {
        self.alerts.snapshot()
    }

    pub fn alert(&self, id: &str) -> Option<Alert> {
        self.alerts.get(id)
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── Derived views ────────────────────────────────────────────────

    /// Active alerts in display order.
    pub fn active_view(&self) -> Vec<Alert> {
        let (active, _) = lifecycle::partition(&self.snapshot());
        lifecycle::sort_active(&active)
    }

    /// Resolved alerts, most recently resolved first.
    pub fn resolved_view(&self) -> Vec<Alert> {
        let (_, resolved) = lifecycle::partition(&self.snapshot());
        lifecycle::sort_resolved(&resolved)
    }

    pub fn metrics(&self) -> AlertMetrics {
        AlertMetrics::compute(&self.snapshot())
    }

    pub fn metrics_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> AlertMetrics {
        AlertMetrics::compute_at(&self.snapshot(), now)
    }

    // ── Lifecycle transitions ────────────────────────────────────────

    /// Acknowledge `id`. Unlike [`lifecycle::acknowledge`], an unknown id
    /// is reported as [`CoreError::AlertNotFound`].
    pub fn acknowledge(&self, id: &str) -> Result<AlertUpdate, CoreError> {
        let applied = self
            .alerts
            .update(id, lifecycle::acknowledged)
            .ok_or_else(|| CoreError::AlertNotFound { id: id.into() })?;
        debug!(id, changed = applied.changed, "alert acknowledged");
        Ok(AlertUpdate {
            alert: applied.alert,
            changed: applied.changed,
        })
    }

    /// Resolve `id` now. Resolving twice is a no-op.
    pub fn resolve(&self, id: &str) -> Result<AlertUpdate, CoreError> {
        self.resolve_at(id, now_millis())
    }

    pub fn resolve_at(&self, id: &str, now: EpochMillis) -> Result<AlertUpdate, CoreError> {
        let applied = self
            .alerts
            .update(id, |a| lifecycle::resolved(a, now))
            .ok_or_else(|| CoreError::AlertNotFound { id: id.into() })?;
        debug!(id, changed = applied.changed, "alert resolved");
        Ok(AlertUpdate {
            alert: applied.alert,
            changed: applied.changed,
        })
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub fn settings(&self) -> AlertSettings {
        self.settings.borrow().clone()
    }

    /// Apply `f` to the settings and broadcast the result.
    pub fn update_settings(&self, f: impl FnOnce(AlertSettings) -> AlertSettings) -> AlertSettings {
        let mut out = None;
        self.settings.send_modify(|s| {
            let next = f(s.clone());
            *s = next.clone();
            out = Some(next);
        });
        out.unwrap_or_else(|| self.settings())
    }

    pub fn set_threshold_enabled(&self, metric: ThresholdMetric, enabled: bool) -> ThresholdSettings {
        self.update_thresholds(|t| t.set_enabled(metric, enabled))
    }

    pub fn set_threshold_high(&self, metric: BoundedMetric, high: f64) -> ThresholdSettings {
        self.update_thresholds(|t| t.set_high(metric, high))
    }

    pub fn set_threshold_low(&self, metric: BoundedMetric, low: f64) -> ThresholdSettings {
        self.update_thresholds(|t| t.set_low(metric, low))
    }

    pub fn set_notification_channel(
        &self,
        channel: NotificationChannel,
        enabled: bool,
    ) -> NotificationChannels {
        self.update_settings(|s| AlertSettings {
            notifications: s.notifications.set(channel, enabled),
            ..s
        })
        .notifications
    }

    fn update_thresholds(
        &self,
        f: impl FnOnce(ThresholdSettings) -> ThresholdSettings,
    ) -> ThresholdSettings {
        self.update_settings(|s| AlertSettings {
            thresholds: f(s.thresholds),
            ..s
        })
        .thresholds
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_alerts(&self) -> AlertStream {
        AlertStream::new(self.alerts.subscribe())
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }
}

impl Default for AlertStore {
    fn default() -> Self {
        Self::new()
    }
}

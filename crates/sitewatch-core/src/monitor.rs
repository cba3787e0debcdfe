// ── Monitor abstraction ──
//
// Full lifecycle management for an alert view: initial load, periodic
// refresh from the source, and operator transitions that are written
// back to the source when they change something.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::error::CoreError;
use crate::lifecycle;
use crate::model::{Alert, EpochMillis};
use crate::source::AlertSource;
use crate::store::{AlertStore, AlertUpdate};
use crate::time::now_millis;

// ── Monitor ──────────────────────────────────────────────────────

/// Owns an [`AlertStore`] and keeps it in sync with an [`AlertSource`].
///
/// Cheaply cloneable via `Arc<MonitorInner>`.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    store: Arc<AlertStore>,
    source: Arc<dyn AlertSource>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Monitor {
    /// Create a monitor with a fresh store. Does NOT load anything;
    /// call [`start()`](Self::start) or [`refresh()`](Self::refresh).
    pub fn new(config: MonitorConfig, source: Arc<dyn AlertSource>) -> Self {
        Self::with_store(config, Arc::new(AlertStore::new()), source)
    }

    pub fn with_store(
        config: MonitorConfig,
        store: Arc<AlertStore>,
        source: Arc<dyn AlertSource>,
    ) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                config,
                store,
                source,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<AlertStore> {
        &self.inner.store
    }

    pub fn source_name(&self) -> &str {
        self.inner.source.name()
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Load the initial alert set, then spawn the periodic refresh task
    /// (unless the interval is 0).
    pub async fn start(&self) -> Result<(), CoreError> {
        self.refresh().await?;

        if let Some(period) = self.inner.config.refresh_interval() {
            let monitor = self.clone();
            let cancel = self.inner.cancel.clone();
            self.inner
                .task_handles
                .lock()
                .await
                .push(tokio::spawn(refresh_task(monitor, period, cancel)));
        }

        info!(source = self.source_name(), "monitor started");
        Ok(())
    }

    /// Cancel background tasks and wait for them to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("monitor stopped");
    }

    /// Fetch the full alert set from the source and replace the store.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let alerts = self.inner.source.fetch_alerts().await?;
        self.inner.store.replace_alerts(alerts);
        Ok(())
    }

    // ── Operator transitions ─────────────────────────────────────

    /// Acknowledge `id`. The source is written first; the store only
    /// changes once the save succeeded.
    pub async fn acknowledge(&self, id: &str) -> Result<AlertUpdate, CoreError> {
        self.save_staged(id, lifecycle::acknowledged).await?;
        self.inner.store.acknowledge(id)
    }

    /// Resolve `id` now. Same ordering as [`acknowledge`](Self::acknowledge).
    pub async fn resolve(&self, id: &str) -> Result<AlertUpdate, CoreError> {
        self.resolve_at(id, now_millis()).await
    }

    pub async fn resolve_at(&self, id: &str, now: EpochMillis) -> Result<AlertUpdate, CoreError> {
        self.save_staged(id, |a| lifecycle::resolved(a, now)).await?;
        self.inner.store.resolve_at(id, now)
    }

    /// Save the collection as it will look once `f` is applied to `id`.
    /// Nothing is written when `f` leaves the record unchanged.
    async fn save_staged(&self, id: &str, f: impl Fn(&Alert) -> Alert) -> Result<(), CoreError> {
        let snapshot = self.inner.store.snapshot();
        let current = snapshot
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::AlertNotFound { id: id.into() })?;
        let next = f(current);
        if next == *current {
            return Ok(());
        }

        let staged: Vec<Alert> = snapshot
            .iter()
            .map(|a| if a.id == id { next.clone() } else { a.clone() })
            .collect();
        self.inner.source.save_alerts(&staged).await
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// One-shot: load once, run closure, shut down.
    ///
    /// Periodic refresh is disabled since the caller only needs a single
    /// request-response cycle.
    pub async fn oneshot<F, Fut, T>(source: Arc<dyn AlertSource>, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Monitor) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let config = MonitorConfig {
            refresh_interval_secs: 0,
        };
        let monitor = Monitor::new(config, source);
        monitor.start().await?;
        let result = f(monitor.clone()).await;
        monitor.shutdown().await;
        result
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Periodically refresh from the source.
async fn refresh_task(monitor: Monitor, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = monitor.refresh().await {
                    warn!(error = %e, source = monitor.source_name(), "periodic refresh failed");
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::metrics::category_count;
    use crate::model::{AlertSeverity, AlertType};
    use crate::source::{FileSource, MockSource, demo_alerts};

    const NOW: EpochMillis = 1_715_688_000_000;

    /// Counts fetches and saves around an in-memory source.
    struct CountingSource {
        inner: MockSource,
        fetches: AtomicUsize,
        saves: AtomicUsize,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                inner: MockSource::seeded_at(NOW),
                fetches: AtomicUsize::new(0),
                saves: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AlertSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        async fn fetch_alerts(&self) -> Result<Vec<Alert>, CoreError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch_alerts().await
        }

        async fn save_alerts(&self, alerts: &[Alert]) -> Result<(), CoreError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.inner.save_alerts(alerts).await
        }
    }

    struct FailingSource;

    #[async_trait]
    impl AlertSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_alerts(&self) -> Result<Vec<Alert>, CoreError> {
            Err(CoreError::Source {
                source_name: "failing".into(),
                message: "unreachable".into(),
            })
        }

        async fn save_alerts(&self, _alerts: &[Alert]) -> Result<(), CoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn start_loads_initial_set() {
        let monitor = Monitor::new(
            MonitorConfig {
                refresh_interval_secs: 0,
            },
            Arc::new(MockSource::seeded_at(NOW)),
        );
        monitor.start().await.unwrap();
        assert_eq!(monitor.store().len(), 3);
        assert!(monitor.store().last_refresh().is_some());
        monitor.shutdown().await;
    }

    #[tokio::test]
    async fn start_propagates_source_failure() {
        let monitor = Monitor::new(MonitorConfig::default(), Arc::new(FailingSource));
        let err = monitor.start().await.unwrap_err();
        assert!(matches!(err, CoreError::Source { .. }));
        assert!(monitor.store().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn periodic_refresh_fires_on_interval() {
        let source = Arc::new(CountingSource::new());
        let monitor = Monitor::new(MonitorConfig::default(), source.clone());
        monitor.start().await.unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(65)).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 3);

        monitor.shutdown().await;
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn transitions_persist_only_on_change() {
        let source = Arc::new(CountingSource::new());
        let monitor = Monitor::new(
            MonitorConfig {
                refresh_interval_secs: 0,
            },
            source.clone(),
        );
        monitor.start().await.unwrap();

        assert!(monitor.acknowledge("alert_02").await.unwrap().changed);
        assert!(!monitor.acknowledge("alert_02").await.unwrap().changed);
        assert!(!monitor.resolve("alert_03").await.unwrap().changed);
        assert_eq!(source.saves.load(Ordering::SeqCst), 1);

        let stored = source.inner.fetch_alerts().await.unwrap();
        assert!(stored.iter().find(|a| a.id == "alert_02").unwrap().acknowledged);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_and_not_saved() {
        let source = Arc::new(CountingSource::new());
        let monitor = Monitor::new(MonitorConfig::default(), source.clone());
        monitor.start().await.unwrap();

        let err = monitor.resolve("alert_99").await.unwrap_err();
        assert!(matches!(err, CoreError::AlertNotFound { .. }));
        assert_eq!(source.saves.load(Ordering::SeqCst), 0);
        monitor.shutdown().await;
    }

    #[tokio::test]
    async fn oneshot_runs_closure_against_loaded_store() {
        let resolved = Monitor::oneshot(
            Arc::new(MockSource::with_alerts(demo_alerts(NOW))),
            |m| async move { m.resolve_at("alert_01", NOW).await },
        )
        .await
        .unwrap();
        assert!(resolved.changed);
        assert!(resolved.alert.acknowledged);
        assert_eq!(resolved.alert.resolved_at, Some(NOW));
    }

    /// Accepts fetches, refuses every save.
    struct ReadOnlySource(MockSource);

    #[async_trait]
    impl AlertSource for ReadOnlySource {
        fn name(&self) -> &str {
            "read-only"
        }

        async fn fetch_alerts(&self) -> Result<Vec<Alert>, CoreError> {
            self.0.fetch_alerts().await
        }

        async fn save_alerts(&self, _alerts: &[Alert]) -> Result<(), CoreError> {
            Err(CoreError::Source {
                source_name: "read-only".into(),
                message: "permission denied".into(),
            })
        }
    }

    #[tokio::test]
    async fn failed_save_leaves_store_untouched() {
        let monitor = Monitor::new(
            MonitorConfig {
                refresh_interval_secs: 0,
            },
            Arc::new(ReadOnlySource(MockSource::seeded_at(NOW))),
        );
        monitor.start().await.unwrap();
        let before = monitor.store().snapshot();

        let err = monitor.acknowledge("alert_02").await.unwrap_err();
        assert!(matches!(err, CoreError::Source { .. }));
        assert!(!monitor.store().alert("alert_02").unwrap().acknowledged);

        assert!(monitor.resolve_at("alert_01", NOW).await.is_err());
        assert!(monitor.store().alert("alert_01").unwrap().is_active());
        assert!(Arc::ptr_eq(&before, &monitor.store().snapshot()));
    }

    #[tokio::test]
    async fn file_source_keeps_unknown_types_of_untouched_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerts.json");
        let alerts = vec![
            Alert::new("a", NOW, AlertType::from("flood"), AlertSeverity::High, "Water"),
            Alert::new("b", NOW, AlertType::from("fire"), AlertSeverity::High, "Smoke"),
        ];
        std::fs::write(&path, serde_json::to_vec(&alerts).unwrap()).unwrap();

        let monitor = Monitor::new(
            MonitorConfig {
                refresh_interval_secs: 0,
            },
            Arc::new(FileSource::new(&path)),
        );
        monitor.start().await.unwrap();
        assert_eq!(category_count(&monitor.store().snapshot()), 2);

        monitor.acknowledge("a").await.unwrap();

        let saved: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved[0]["type"], "flood");
        assert_eq!(saved[0]["acknowledged"], true);
        assert_eq!(saved[1]["type"], "fire");
        assert_eq!(category_count(&monitor.store().snapshot()), 2);
    }
}

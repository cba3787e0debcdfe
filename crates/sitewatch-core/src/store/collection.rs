// ── Reactive alert collection ──
//
// Ordered storage with push-based change notification via `watch`
// channels. Order is the order the data source delivered, which the
// stable display sorts rely on.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::Alert;

/// Result of applying a single-record transition.
pub(crate) struct Applied {
    pub alert: Alert,
    pub changed: bool,
}

/// Ordered, reactive collection of alerts.
///
/// Every mutation that actually changes a record broadcasts a fresh
/// snapshot to subscribers. No-op mutations notify nobody.
pub(crate) struct AlertCollection {
    /// Full snapshot, replaced on mutation.
    snapshot: watch::Sender<Arc<Vec<Alert>>>,
}

impl AlertCollection {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self { snapshot }
    }

    /// Replace the whole collection in one step, so subscribers never
    /// observe an empty intermediate state.
    pub(crate) fn replace(&self, alerts: Vec<Alert>) {
        let incoming = Arc::new(alerts);
        self.snapshot.send_if_modified(|snap| {
            if **snap == *incoming {
                false
            } else {
                *snap = Arc::clone(&incoming);
                true
            }
        });
    }

    /// Apply `transition` to the record with `id`.
    ///
    /// Returns `None` when no record matches. The snapshot is only
    /// rebuilt and broadcast when the transition changed the record.
    pub(crate) fn update(&self, id: &str, transition: impl FnOnce(&Alert) -> Alert) -> Option<Applied> {
        let mut outcome = None;
        self.snapshot.send_if_modified(|snap| {
            let Some(idx) = snap.iter().position(|a| a.id == id) else {
                return false;
            };
            let next = transition(&snap[idx]);
            let changed = next != snap[idx];
            if changed {
                Arc::make_mut(snap)[idx] = next.clone();
            }
            outcome = Some(Applied {
                alert: next,
                changed,
            });
            changed
        });
        outcome
    }

    pub(crate) fn get(&self, id: &str) -> Option<Alert> {
        self.snapshot.borrow().iter().find(|a| a.id == id).cloned()
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Alert>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Alert>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

}

// ── Refresh application logic ──
//
// Applies a freshly fetched alert set to the store. The incoming set
// replaces the collection wholesale; duplicate ids keep their first
// occurrence.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, warn};

use super::AlertStore;
use crate::model::Alert;

impl AlertStore {
    /// Replace the alert collection with `incoming` and stamp the refresh time.
    pub fn replace_alerts(&self, incoming: Vec<Alert>) {
        let previous: HashSet<String> = self.snapshot().iter().map(|a| a.id.clone()).collect();

        let mut seen = HashSet::with_capacity(incoming.len());
        let mut alerts = Vec::with_capacity(incoming.len());
        for alert in incoming {
            if seen.insert(alert.id.clone()) {
                alerts.push(alert);
            } else {
                warn!(id = %alert.id, "duplicate alert id in refresh, keeping first");
            }
        }

        let added = alerts.iter().filter(|a| !previous.contains(&a.id)).count();
        let removed = previous.iter().filter(|id| !seen.contains(*id)).count();

        self.alerts.replace(alerts);
        let _ = self.last_refresh.send_replace(Some(Utc::now()));

        debug!(total = self.len(), added, removed, "alert refresh applied");
    }
}

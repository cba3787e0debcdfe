// ── Runtime monitor configuration ──
//
// Describes how the monitor runs. Built by the CLI from the on-disk
// config and handed in; core never reads config files.

use std::time::Duration;

/// Default seconds between periodic refreshes.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

/// Configuration for a [`Monitor`](crate::Monitor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// How often to refresh from the source (seconds). 0 = never.
    pub refresh_interval_secs: u64,
}

impl MonitorConfig {
    /// The refresh period, or `None` when periodic refresh is disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}

// sitewatch-core: Alert lifecycle, derived metrics and reactive store
// between alert sources and consumers (CLI).

pub mod classify;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod metrics;
pub mod model;
pub mod monitor;
pub mod source;
pub mod store;
pub mod stream;
pub mod time;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::MonitorConfig;
pub use error::CoreError;
pub use metrics::AlertMetrics;
pub use monitor::Monitor;
pub use source::{AlertSource, FileSource, MockSource};
pub use store::{AlertStore, AlertUpdate};
pub use stream::{AlertFilter, AlertStream};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Alerts
    Alert, AlertSeverity, AlertStatus, AlertType, EpochMillis, RecordError,
    // Settings
    AlertSettings, BoundedMetric, Breach, NotificationChannel, NotificationChannels,
    RangeThreshold, Recipient, ThresholdMetric, ThresholdSettings, ToggleThreshold,
};

// ── Domain model ──
//
// Canonical alert and settings types shared by the store, the data
// sources and the CLI.

pub mod alert;
pub mod notification;
pub mod threshold;

use serde::{Deserialize, Serialize};

pub use alert::{Alert, AlertSeverity, AlertStatus, AlertType, EpochMillis, RecordError};
pub use notification::{
    NotificationChannel, NotificationChannels, Recipient, toggle_message,
};
pub use threshold::{
    Breach, BoundedMetric, RangeThreshold, ThresholdMetric, ThresholdSettings, ToggleThreshold,
};

/// Everything an operator can tune about alerting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSettings {
    #[serde(default)]
    pub notifications: NotificationChannels,
    #[serde(default)]
    pub thresholds: ThresholdSettings,
    #[serde(default)]
    pub recipients: Vec<Recipient>,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            notifications: NotificationChannels::default(),
            thresholds: ThresholdSettings::default(),
            recipients: vec![Recipient {
                id: "user_01".into(),
                name: "John Doe".into(),
                email: "john.doe@example.com".into(),
                phone: Some("+1234567890".into()),
                role: "Admin".into(),
                notification_types: vec![
                    NotificationChannel::Email,
                    NotificationChannel::Sms,
                    NotificationChannel::Push,
                ],
            }],
        }
    }
}

impl AlertSettings {
    /// Recipients reachable on `channel`. Empty while the channel is off.
    pub fn recipients_for(&self, channel: NotificationChannel) -> Vec<&Recipient> {
        if !self.notifications.is_enabled(channel) {
            return Vec::new();
        }
        self.recipients
            .iter()
            .filter(|r| r.subscribes_to(channel))
            .collect()
    }
}

// ── Notification channels and recipients ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationChannel {
    Email,
    Sms,
    Push,
    Slack,
}

impl NotificationChannel {
    /// Display name used in operator messages ("Email", "Sms", ...).
    pub fn title(self) -> String {
        let name = self.to_string();
        let mut chars = name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

/// Which delivery channels are switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationChannels {
    pub email: bool,
    pub sms: bool,
    pub push: bool,
    pub slack: bool,
}

impl Default for NotificationChannels {
    fn default() -> Self {
        Self {
            email: true,
            sms: false,
            push: true,
            slack: true,
        }
    }
}

impl NotificationChannels {
    pub fn is_enabled(&self, channel: NotificationChannel) -> bool {
        match channel {
            NotificationChannel::Email => self.email,
            NotificationChannel::Sms => self.sms,
            NotificationChannel::Push => self.push,
            NotificationChannel::Slack => self.slack,
        }
    }

    pub fn set(mut self, channel: NotificationChannel, enabled: bool) -> Self {
        match channel {
            NotificationChannel::Email => self.email = enabled,
            NotificationChannel::Sms => self.sms = enabled,
            NotificationChannel::Push => self.push = enabled,
            NotificationChannel::Slack => self.slack = enabled,
        }
        self
    }
}

/// Operator message for a channel toggle.
pub fn toggle_message(channel: NotificationChannel, enabled: bool) -> String {
    let (state, adverb) = if enabled {
        ("Enabled", "now")
    } else {
        ("Disabled", "no longer")
    };
    format!(
        "{} Notifications {state}: you will {adverb} receive {channel} notifications",
        channel.title()
    )
}

/// Someone who receives alert notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: String,
    #[serde(default)]
    pub notification_types: Vec<NotificationChannel>,
}

impl Recipient {
    pub fn subscribes_to(&self, channel: NotificationChannel) -> bool {
        self.notification_types.contains(&channel)
    }
}

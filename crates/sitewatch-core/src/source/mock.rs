// ── In-memory demo source ──

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::AlertSource;
use crate::error::CoreError;
use crate::model::{Alert, AlertSeverity, AlertStatus, AlertType, EpochMillis};
use crate::time::now_millis;

const MINUTE_MS: EpochMillis = 60_000;

/// Canned demo data, held in memory.
///
/// Seeded once at construction; operator transitions saved back are
/// returned by later fetches.
pub struct MockSource {
    alerts: Mutex<Vec<Alert>>,
}

impl MockSource {
    /// Seed with the demo alerts, timestamped relative to the current time.
    pub fn new() -> Self {
        Self::seeded_at(now_millis())
    }

    pub fn seeded_at(now: EpochMillis) -> Self {
        Self::with_alerts(demo_alerts(now))
    }

    pub fn with_alerts(alerts: Vec<Alert>) -> Self {
        Self {
            alerts: Mutex::new(alerts),
        }
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_alerts(&self) -> Result<Vec<Alert>, CoreError> {
        Ok(self.alerts.lock().await.clone())
    }

    async fn save_alerts(&self, alerts: &[Alert]) -> Result<(), CoreError> {
        *self.alerts.lock().await = alerts.to_vec();
        Ok(())
    }
}

/// Two active alerts and one recently resolved.
pub fn demo_alerts(now: EpochMillis) -> Vec<Alert> {
    let resolved_ups = Alert {
        status: AlertStatus::Resolved,
        acknowledged: true,
        resolved_at: Some(now - 40 * MINUTE_MS),
        ..Alert::new(
            "alert_03",
            now - 45 * MINUTE_MS,
            AlertType::Power,
            AlertSeverity::Low,
            "UPS Switched to Battery",
        )
        .with_description("UPS system switched to battery power for 30 seconds")
        .with_source("UPS System")
    };

    vec![
        Alert::new(
            "alert_01",
            now - 5 * MINUTE_MS,
            AlertType::Security,
            AlertSeverity::High,
            "Unauthorized Access Attempt",
        )
        .with_description("Multiple failed access attempts at Main Entrance")
        .with_source("RFID Reader - Main Entrance"),
        Alert::new(
            "alert_02",
            now - 15 * MINUTE_MS,
            AlertType::Temperature,
            AlertSeverity::Medium,
            "Temperature Above Threshold",
        )
        .with_description("Server Room A temperature reached 26.5°C (threshold: 25°C)")
        .with_source("Temperature Sensor - Server Room A"),
        resolved_ups,
    ]
}

//! Shared helpers for command handlers.

use sitewatch_config::{load_file_config, save_config};
use sitewatch_core::{
    AlertSettings, AlertSeverity, AlertStore, BoundedMetric, NotificationChannel, ThresholdMetric,
};

use crate::cli::{BoundedMetricArg, ChannelArg, MetricArg, SeverityArg};
use crate::error::CliError;

use super::Context;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Apply `edit` to the alert settings in the config file and save them.
///
/// Starts from the file alone, so `SITEWATCH_*` overrides active for
/// this run are not written back.
pub fn edit_alert_settings(
    ctx: &Context,
    edit: impl FnOnce(&AlertStore),
) -> Result<AlertSettings, CliError> {
    let mut config = load_file_config(&ctx.config_path)?;
    let store = AlertStore::with_settings(config.alerts.clone());
    edit(&store);
    config.alerts = store.settings();
    save_config(&config, &ctx.config_path)?;
    tracing::debug!(path = %ctx.config_path.display(), "settings saved");
    Ok(config.alerts)
}

// ── CLI value → core type ───────────────────────────────────────────

impl From<MetricArg> for ThresholdMetric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Temperature => Self::Temperature,
            MetricArg::Humidity => Self::Humidity,
            MetricArg::Power => Self::Power,
            MetricArg::Security => Self::Security,
        }
    }
}

impl From<BoundedMetricArg> for BoundedMetric {
    fn from(m: BoundedMetricArg) -> Self {
        match m {
            BoundedMetricArg::Temperature => Self::Temperature,
            BoundedMetricArg::Humidity => Self::Humidity,
        }
    }
}

impl From<SeverityArg> for AlertSeverity {
    fn from(s: SeverityArg) -> Self {
        match s {
            SeverityArg::High => Self::High,
            SeverityArg::Medium => Self::Medium,
            SeverityArg::Low => Self::Low,
        }
    }
}

impl From<ChannelArg> for NotificationChannel {
    fn from(c: ChannelArg) -> Self {
        match c {
            ChannelArg::Email => Self::Email,
            ChannelArg::Sms => Self::Sms,
            ChannelArg::Push => Self::Push,
            ChannelArg::Slack => Self::Slack,
        }
    }
}

/// "yes" / "no" for table cells.
pub fn yes_no(b: bool) -> String {
    if b { "yes" } else { "no" }.into()
}

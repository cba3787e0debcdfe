//! Threshold command handlers.
//!
//! Thresholds live in the `[alerts.thresholds]` section of the config
//! file; every edit is applied through the alert store and saved back.

use serde::Serialize;
use tabled::Tabled;

use sitewatch_core::{BoundedMetric, ThresholdMetric, ThresholdSettings};

use crate::cli::{ThresholdsArgs, ThresholdsCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
struct ThresholdRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Enabled", display_with = "display_enabled")]
    enabled: bool,
    #[tabled(rename = "Low", display_with = "display_bound")]
    low: Option<f64>,
    #[tabled(rename = "High", display_with = "display_bound")]
    high: Option<f64>,
    #[tabled(rename = "Unit")]
    unit: &'static str,
}

fn display_enabled(b: &bool) -> String {
    util::yes_no(*b)
}

fn display_bound(v: &Option<f64>) -> String {
    v.map_or_else(|| "-".into(), |v| v.to_string())
}

fn rows(t: &ThresholdSettings) -> Vec<ThresholdRow> {
    let bounded = [BoundedMetric::Temperature, BoundedMetric::Humidity].map(|m| {
        let r = t.range(m);
        ThresholdRow {
            metric: m.to_string(),
            enabled: r.enabled,
            low: Some(r.low),
            high: Some(r.high),
            unit: m.unit(),
        }
    });
    let toggles = [ThresholdMetric::Power, ThresholdMetric::Security].map(|m| ThresholdRow {
        metric: m.to_string(),
        enabled: t.is_enabled(m),
        low: None,
        high: None,
        unit: "",
    });
    bounded.into_iter().chain(toggles).collect()
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ThresholdsArgs, ctx: &Context) -> Result<(), CliError> {
    let thresholds = match args.command {
        ThresholdsCommand::Show => ctx.config.alerts.thresholds,

        ThresholdsCommand::Enable { metric } => toggle(metric.into(), true, ctx)?,

        ThresholdsCommand::Disable { metric } => toggle(metric.into(), false, ctx)?,

        ThresholdsCommand::Set { metric, high, low } => {
            if high.is_none() && low.is_none() {
                return Err(CliError::Validation {
                    field: "thresholds set".into(),
                    reason: "pass --high, --low, or both".into(),
                });
            }
            let metric = BoundedMetric::from(metric);
            util::edit_alert_settings(ctx, |store| {
                if let Some(high) = high {
                    store.set_threshold_high(metric, high);
                }
                if let Some(low) = low {
                    store.set_threshold_low(metric, low);
                }
            })?
            .thresholds
        }
    };

    let out = output::render_list(
        ctx.render.format,
        &rows(&thresholds),
        Clone::clone,
        |r| format!("{}={}", r.metric, util::yes_no(r.enabled)),
    )?;
    output::print_output(&out, ctx.render.quiet);
    Ok(())
}

fn toggle(metric: ThresholdMetric, enabled: bool, ctx: &Context) -> Result<ThresholdSettings, CliError> {
    let settings = util::edit_alert_settings(ctx, |store| {
        store.set_threshold_enabled(metric, enabled);
    })?;
    let state = if enabled { "enabled" } else { "disabled" };
    output::print_status(&format!("{metric} alerts {state}"), ctx.render.quiet);
    Ok(settings.thresholds)
}

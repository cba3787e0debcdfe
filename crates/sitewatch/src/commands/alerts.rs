//! Alert command handlers.

use std::fmt::Write as _;

use tabled::Tabled;

use sitewatch_core::classify::{Describe, state_badge};
use sitewatch_core::time::{format_local, relative_label_local};
use sitewatch_core::{Alert, AlertFilter, AlertMetrics, AlertType, AlertUpdate, Monitor};

use crate::cli::{AlertsArgs, AlertsCommand, SeverityArg};
use crate::error::CliError;
use crate::output::{self, badge};

use super::Context;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Raised")]
    raised: String,
}

impl AlertRow {
    fn new(a: &Alert, color: bool) -> Self {
        Self {
            id: a.id.clone(),
            severity: badge(a.severity.descriptor(), color),
            kind: badge(a.kind.descriptor(), color),
            title: a.title.clone(),
            source: a.source.clone(),
            state: badge(state_badge(a), color),
            raised: relative_label_local(a.timestamp),
        }
    }
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: usize,
}

fn metric_rows(m: &AlertMetrics) -> Vec<MetricRow> {
    vec![
        MetricRow {
            name: "Active",
            value: m.active_count,
        },
        MetricRow {
            name: "High priority active",
            value: m.high_priority_active_count,
        },
        MetricRow {
            name: "Unacknowledged",
            value: m.unacknowledged_count,
        },
        MetricRow {
            name: "Resolved today",
            value: m.resolved_today_count,
        },
        MetricRow {
            name: "Categories",
            value: m.category_count,
        },
    ]
}

// ── Detail view ─────────────────────────────────────────────────────

fn detail(a: &Alert, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", badge(a.kind.descriptor(), color), a.title);
    let _ = writeln!(out);
    let _ = writeln!(out, "ID:           {}", a.id);
    let _ = writeln!(out, "Severity:     {}", badge(a.severity.descriptor(), color));
    let _ = writeln!(out, "State:        {}", badge(state_badge(a), color));
    let _ = writeln!(out, "Source:       {}", a.source);
    let _ = writeln!(
        out,
        "Raised:       {} ({})",
        format_local(a.timestamp),
        relative_label_local(a.timestamp)
    );
    if let Some(resolved_at) = a.resolved_at {
        let _ = writeln!(
            out,
            "Resolved:     {} ({})",
            format_local(resolved_at),
            relative_label_local(resolved_at)
        );
    }
    if !a.description.is_empty() {
        let _ = writeln!(out);
        let _ = write!(out, "{}", a.description);
    }
    out.trim_end().to_owned()
}

fn list_filters(severity: Option<SeverityArg>, kind: Option<String>, unacked: bool) -> Vec<AlertFilter> {
    let mut filters = Vec::new();
    if let Some(severity) = severity {
        filters.push(AlertFilter::BySeverity(severity.into()));
    }
    if let Some(kind) = kind {
        filters.push(AlertFilter::ByType(AlertType::from(kind)));
    }
    if unacked {
        filters.push(AlertFilter::Unacknowledged);
    }
    filters
}

fn transition_message(update: &AlertUpdate, verb: &str) -> String {
    if update.changed {
        format!("Alert {} {verb}", update.alert.id)
    } else {
        format!("Alert {} was already {verb}", update.alert.id)
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: AlertsArgs, ctx: &Context) -> Result<(), CliError> {
    let source = ctx.config.build_source()?;
    let render = ctx.render;

    match args.command {
        AlertsCommand::List {
            active,
            resolved,
            severity,
            kind,
            unacked,
        } => {
            let filters = list_filters(severity, kind, unacked);
            let alerts = Monitor::oneshot(source, |m| async move {
                let store = m.store();
                let mut out = Vec::new();
                if !resolved {
                    out.extend(store.active_view());
                }
                if !active {
                    out.extend(store.resolved_view());
                }
                Ok(AlertFilter::apply_all(&filters, out))
            })
            .await?;

            let out = output::render_list(
                render.format,
                &alerts,
                |a| AlertRow::new(a, render.color),
                |a| a.id.clone(),
            )?;
            output::print_output(&out, render.quiet);
            Ok(())
        }

        AlertsCommand::Show { id } => {
            let alert = Monitor::oneshot(source, |m| async move {
                m.store()
                    .alert(&id)
                    .ok_or(sitewatch_core::CoreError::AlertNotFound { id })
            })
            .await?;

            let out = output::render_single(
                render.format,
                &alert,
                |a| detail(a, render.color),
                |a| a.id.clone(),
            )?;
            output::print_output(&out, render.quiet);
            Ok(())
        }

        AlertsCommand::Ack { id } => {
            let update = Monitor::oneshot(source, |m| async move {
                m.acknowledge(&id).await
            })
            .await?;
            print_update(&update, "acknowledged", ctx)
        }

        AlertsCommand::Resolve { id } => {
            let update = Monitor::oneshot(source, |m| async move {
                m.resolve(&id).await
            })
            .await?;
            print_update(&update, "resolved", ctx)
        }

        AlertsCommand::Stats => {
            let metrics =
                Monitor::oneshot(source, |m| async move { Ok(m.store().metrics()) })
                    .await?;

            let out = output::render_single(
                render.format,
                &metrics,
                |m| {
                    tabled::Table::new(metric_rows(m))
                        .with(tabled::settings::Style::rounded())
                        .to_string()
                },
                |m| m.active_count.to_string(),
            )?;
            output::print_output(&out, render.quiet);
            Ok(())
        }
    }
}

fn print_update(update: &AlertUpdate, verb: &str, ctx: &Context) -> Result<(), CliError> {
    let render = ctx.render;
    let out = output::render_single(
        render.format,
        update,
        |u| transition_message(u, verb),
        |u| u.alert.id.clone(),
    )?;
    output::print_output(&out, render.quiet);
    Ok(())
}

//! Watch handler: keep the monitor running and report metric changes.

use chrono::{DateTime, Local};
use futures_util::StreamExt;
use tokio::signal;

use sitewatch_core::{AlertMetrics, Monitor, MonitorConfig};

use crate::cli::{OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

use super::Context;

/// One status line per change, stamped with the last refresh, e.g.
/// `[14:02:11] active 2 (1 high) · unacknowledged 2 · resolved today 1 · categories 3`.
fn status_line(m: &AlertMetrics, refreshed: DateTime<Local>, color: bool) -> String {
    let high = format!("{} high", m.high_priority_active_count);
    let high = if m.high_priority_active_count > 0 {
        output::paint(&high, sitewatch_core::classify::Tone::Red, color)
    } else {
        high
    };
    format!(
        "[{}] active {} ({high}) · unacknowledged {} · resolved today {} · categories {}",
        refreshed.format("%H:%M:%S"),
        m.active_count,
        m.unacknowledged_count,
        m.resolved_today_count,
        m.category_count,
    )
}

fn render(m: &AlertMetrics, refreshed: DateTime<Local>, ctx: &Context) -> Result<String, CliError> {
    match ctx.render.format {
        // One JSON line per change
        OutputFormat::Json | OutputFormat::JsonCompact => {
            output::render_single(OutputFormat::JsonCompact, m, |_| String::new(), |_| String::new())
        }
        OutputFormat::Yaml => {
            output::render_single(OutputFormat::Yaml, m, |_| String::new(), |_| String::new())
                .map(|doc| format!("---\n{}", doc.trim_end()))
        }
        OutputFormat::Plain => Ok(m.active_count.to_string()),
        OutputFormat::Table => Ok(status_line(m, refreshed, ctx.render.color)),
    }
}

pub async fn handle(args: WatchArgs, ctx: &Context) -> Result<(), CliError> {
    let mut config = ctx.config.monitor_config();
    if let Some(interval) = args.interval {
        config = MonitorConfig {
            refresh_interval_secs: interval.as_secs().max(1),
        };
    }

    let monitor = Monitor::new(config, ctx.config.build_source()?);
    monitor.start().await?;
    tracing::info!(
        source = monitor.source_name(),
        interval_secs = monitor.config().refresh_interval_secs,
        "watching alerts (Ctrl-C to stop)"
    );

    // First item is the snapshot from the initial refresh.
    let mut updates = monitor.store().subscribe_alerts();
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => break,
            snapshot = updates.next() => {
                let Some(snapshot) = snapshot else { break };
                let refreshed = monitor
                    .store()
                    .last_refresh()
                    .map_or_else(Local::now, |t| t.with_timezone(&Local));
                let line = render(&AlertMetrics::compute(&snapshot), refreshed, ctx)?;
                output::print_output(&line, ctx.render.quiet);
            }
        }
    }

    monitor.shutdown().await;
    Ok(())
}

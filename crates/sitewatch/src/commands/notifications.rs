//! Notification channel and recipient handlers.

use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;

use sitewatch_core::model::toggle_message;
use sitewatch_core::{AlertSettings, NotificationChannel, Recipient};

use crate::cli::{NotificationsArgs, NotificationsCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Tabled)]
struct ChannelRow {
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Enabled", display_with = "display_enabled")]
    enabled: bool,
    #[tabled(rename = "Reaches")]
    recipients: usize,
}

fn display_enabled(b: &bool) -> String {
    util::yes_no(*b)
}

fn channel_rows(settings: &AlertSettings) -> Vec<ChannelRow> {
    NotificationChannel::iter()
        .map(|c| ChannelRow {
            channel: c.to_string(),
            enabled: settings.notifications.is_enabled(c),
            recipients: settings.recipients_for(c).len(),
        })
        .collect()
}

#[derive(Tabled)]
struct RecipientRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Channels")]
    channels: String,
}

impl From<&Recipient> for RecipientRow {
    fn from(r: &Recipient) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            email: r.email.clone(),
            phone: r.phone.clone().unwrap_or_else(|| "-".into()),
            role: r.role.clone(),
            channels: r
                .notification_types
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: NotificationsArgs, ctx: &Context) -> Result<(), CliError> {
    let render = ctx.render;

    match args.command {
        NotificationsCommand::Show => print_channels(&ctx.config.alerts, ctx),

        NotificationsCommand::Enable { channel } => toggle(channel.into(), true, ctx),

        NotificationsCommand::Disable { channel } => toggle(channel.into(), false, ctx),

        NotificationsCommand::Recipients { channel } => {
            let settings = &ctx.config.alerts;
            let recipients: Vec<Recipient> = match channel {
                Some(c) => settings.recipients_for(c.into()).into_iter().cloned().collect(),
                None => settings.recipients.clone(),
            };
            let out = output::render_list(
                render.format,
                &recipients,
                |r| RecipientRow::from(r),
                |r| r.email.clone(),
            )?;
            output::print_output(&out, render.quiet);
            Ok(())
        }
    }
}

fn toggle(channel: NotificationChannel, enabled: bool, ctx: &Context) -> Result<(), CliError> {
    let settings = util::edit_alert_settings(ctx, |store| {
        store.set_notification_channel(channel, enabled);
    })?;

    output::print_status(&toggle_message(channel, enabled), ctx.render.quiet);
    print_channels(&settings, ctx)
}

fn print_channels(settings: &AlertSettings, ctx: &Context) -> Result<(), CliError> {
    let render = ctx.render;
    let out = output::render_list(
        render.format,
        &channel_rows(settings),
        Clone::clone,
        |r| format!("{}={}", r.channel, util::yes_no(r.enabled)),
    )?;
    output::print_output(&out, render.quiet);
    Ok(())
}

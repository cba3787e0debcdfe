//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod alerts;
pub mod config_cmd;
pub mod notifications;
pub mod thresholds;
pub mod util;
pub mod watch;

use std::path::PathBuf;

use sitewatch_config::Config;

use crate::cli::Command;
use crate::error::CliError;
use crate::output::Render;

/// Everything a command handler needs besides its own arguments.
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub render: Render,
}

/// Dispatch a config-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: Context) -> Result<(), CliError> {
    match cmd {
        Command::Alerts(args) => alerts::handle(args, &ctx).await,
        Command::Thresholds(args) => thresholds::handle(args, &ctx),
        Command::Notifications(args) => notifications::handle(args, &ctx),
        Command::Watch(args) => watch::handle(args, &ctx).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions are handled before dispatch".into(),
        )),
    }
}

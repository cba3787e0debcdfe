//! Config subcommand handlers.

use std::path::Path;

use sitewatch_config::{Config, load_config, save_config};

use crate::cli::{ConfigArgs, ConfigCommand};
use crate::error::CliError;
use crate::output::{self, Render};

use super::util;

pub fn handle(args: ConfigArgs, path: &Path, render: Render, yes: bool) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), render.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = load_config(path)?;
            let out = output::render_single(
                render.format,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("# unrenderable: {e}")),
                |_| path.display().to_string(),
            )?;
            output::print_output(out.trim_end(), render.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            if path.exists() {
                if !force {
                    return Err(CliError::ConfigExists {
                        path: path.display().to_string(),
                    });
                }
                if !util::confirm(&format!("Overwrite {}?", path.display()), yes)? {
                    return Ok(());
                }
            }
            save_config(&Config::default(), path)?;
            output::print_status(&format!("Wrote default config to {}", path.display()), render.quiet);
            Ok(())
        }
    }
}

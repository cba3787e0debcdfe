mod cli;
mod commands;
mod error;
mod output;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use sitewatch_config::{Config, config_path, load_config};

use crate::cli::{Cli, ColorMode, Command, GlobalOpts, OutputFormat};
use crate::commands::Context;
use crate::error::CliError;
use crate::output::Render;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let path = cli.global.config.clone().unwrap_or_else(config_path);

    match cli.command {
        // Config commands must work even when the file is broken
        Command::Config(args) => {
            let render = resolve_render(&cli.global, &Config::default());
            commands::config_cmd::handle(args, &path, render, cli.global.yes)
        }

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "sitewatch", &mut std::io::stdout());
            Ok(())
        }

        // Everything else runs against the loaded config
        cmd => {
            let config = load_config(&path)?;
            let ctx = Context {
                render: resolve_render(&cli.global, &config),
                config,
                config_path: path,
            };

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, ctx).await
        }
    }
}

/// CLI flags win over `[defaults]`; unknown default values fall back to
/// table output and automatic color.
fn resolve_render(global: &GlobalOpts, config: &Config) -> Render {
    let format = global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&config.defaults.output, true).unwrap_or(OutputFormat::Table)
    });
    let color = global.color.unwrap_or_else(|| {
        ColorMode::from_str(&config.defaults.color, true).unwrap_or(ColorMode::Auto)
    });
    Render {
        format,
        color: output::should_color(color),
        quiet: global.quiet,
    }
}

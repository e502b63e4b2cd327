//! dayplan - AI day planning assistant
//!
//! CLI entry point: sets up logging, loads the config and dispatches to the
//! command handlers. With no subcommand the interactive planner starts.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use day_assistant::cli::Cli;
use day_assistant::cmd::{cmd_categories, cmd_completions, cmd_plan, cmd_ui, Commands};
use day_assistant::config::Config;

/// Log file location: `<data dir>/day-assistant/logs/day-assistant.log`.
fn log_file_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("day-assistant")
        .join("logs")
        .join("day-assistant.log")
}

/// Route `tracing` output to the log file. `RUST_LOG` directives still apply
/// on top of the base level.
fn setup_logging(verbose: bool) -> Result<()> {
    let path = log_file_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    // truncated on each start, one run per file
    let log_file = fs::File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;

    let base_level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(base_level.into());

    // stdout belongs to the TUI and to `plan` output
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();

    info!(path = %path.display(), verbose, "logging to file");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(
        model = %config.classifier.model,
        boost_urgent = config.planner.boost_urgent,
        "loaded config"
    );

    match cli.command {
        None => cmd_ui(&config, None, false),
        Some(Commands::Ui { name, no_boost }) => cmd_ui(&config, name, no_boost),
        Some(Commands::Plan { text, file, no_boost, json }) => cmd_plan(&config, text, file, no_boost, json),
        Some(Commands::Categories) => {
            cmd_categories();
            Ok(())
        }
        Some(Commands::Completions { shell }) => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

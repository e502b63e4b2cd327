use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Plan your day from a messy list of notes.
/// Runs the interactive planner when no subcommand is given.
#[derive(Parser)]
#[command(name = "dayplan", version, about = "AI day planning assistant")]
pub struct Cli {
    /// Path to a YAML config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

//! Command implementations for the CLI interface.
//!
//! Each subcommand maps to one `cmd_*` handler. Handlers build what they need
//! from the loaded [`Config`] and report failures through `eyre`.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use clap_complete::{generate, Shell};
use eyre::{eyre, Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzer::{estimate_for, TaskAnalyzer};
use crate::classifier::SharedClassifier;
use crate::config::Config;
use crate::error::Error;
use crate::fields::Category;
use crate::store::{print_table, Session};
use crate::summary::{summarize, Summary};
use crate::task::TaskRecord;
use crate::tui::app::App;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive planner (the default).
    Ui {
        /// Name to greet, skipping the welcome screen.
        #[arg(long)]
        name: Option<String>,
        /// Start with urgent-task boosting turned off.
        #[arg(long)]
        no_boost: bool,
    },

    /// Analyze a task list once and print the plan.
    Plan {
        /// Tasks separated by commas, semicolons or new lines. Reads stdin when
        /// neither TEXT nor --file is given.
        text: Option<String>,
        /// Read the task list from a file.
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Do not raise tasks with urgent keywords to High.
        #[arg(long)]
        no_boost: bool,
        /// Print a JSON report instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// List the task categories and their time estimates.
    Categories,

    /// Generate shell completion scripts.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// JSON output of `plan --json`.
#[derive(Serialize)]
struct PlanReport<'a> {
    generated_at: DateTime<Utc>,
    boost_urgent: bool,
    tasks: &'a [TaskRecord],
    summary: Option<Summary>,
}

/// Build an analyzer whose classifier is only constructed on first use.
fn build_analyzer(config: &Config) -> TaskAnalyzer {
    let shared = SharedClassifier::from_config(config.classifier.clone());
    TaskAnalyzer::new(Arc::new(shared))
}

/// Launch the TUI.
pub fn cmd_ui(config: &Config, name: Option<String>, no_boost: bool) -> Result<()> {
    let boost_urgent = config.planner.boost_urgent && !no_boost;
    let username = name.or_else(|| config.planner.username.clone());
    info!(boost_urgent, preset_name = username.is_some(), "starting TUI");

    let app = App::new(build_analyzer(config), boost_urgent, username.as_deref());
    run_tui(app).context("UI error")
}

/// Read the raw task list from the argument, a file, or stdin.
fn read_plan_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        debug!(path = %path.display(), "reading tasks from file");
        return fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf).context("Failed to read tasks from stdin")?;
    Ok(buf)
}

/// Analyze a task list once and print the plan.
pub fn cmd_plan(config: &Config, text: Option<String>, file: Option<PathBuf>, no_boost: bool, json: bool) -> Result<()> {
    let raw = read_plan_input(text, file)?;
    let boost_urgent = config.planner.boost_urgent && !no_boost;
    let analyzer = build_analyzer(config);

    let mut session = Session::new();
    match session.generate_plan(&analyzer, &raw, boost_urgent) {
        Ok(_) => {}
        Err(Error::InputEmpty) => {
            return Err(eyre!(
                "No tasks found in input. Separate tasks with commas, semicolons or new lines."
            ));
        }
        Err(e) => return Err(e).context("Failed to generate plan"),
    }

    let tasks = session.tasks.tasks();
    let summary = summarize(tasks);

    if json {
        let report = PlanReport {
            generated_at: Utc::now(),
            boost_urgent,
            tasks,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_table(tasks);
    if let Some(summary) = summary {
        println!();
        println!("{}", summary.mood.message());
        println!(
            "Total: {}  High: {}  Low: {}",
            summary.total, summary.high_count, summary.low_count
        );
        println!("Start with: {}", summary.start_task);
    }
    Ok(())
}

/// Print the category table.
pub fn cmd_categories() {
    println!("{:<20} {}", "Category", "Estimate");
    for category in Category::ALL {
        println!("{:<20} {}", category.label(), estimate_for(category));
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}

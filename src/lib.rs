//! # Day Assistant - AI day planning in the terminal
//!
//! Paste a free-form list of the things you want to get done today and get
//! back a plan: each task is categorised by a zero-shot text classifier, given
//! a priority from keyword rules and a time estimate from its category, and
//! the whole day is summed up with a mood and a suggested first task.
//!
//! ## Key Features
//!
//! - **Forgiving input**: tasks separated by commas, semicolons, new lines or bullets
//! - **Zero-shot categories**: Bug fix, Feature development, Refactoring, Documentation,
//!   Learning/Research, Testing, DevOps/Deployment, Other
//! - **Deterministic rules**: priority and estimate never depend on anything but the text
//!   and the category
//! - **Two interfaces**: an interactive TUI and a one-shot `plan` command for scripts
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the planner
//! dayplan
//!
//! # Plan from the command line
//! dayplan plan "fix login bug, update README, write tests for payment service"
//!
//! # Pipe notes in and get JSON back
//! cat notes.txt | dayplan plan --json
//! ```
//!
//! The classifier is the Hugging Face inference API by default; set `HF_TOKEN`
//! (or the variable named by `classifier.api_key_env`) to authenticate.

pub mod analyzer;
pub mod classifier;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fields;
pub mod segment;
pub mod store;
pub mod summary;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

pub use analyzer::TaskAnalyzer;
pub use classifier::{SharedClassifier, ZeroShotClassifier};
pub use error::{ClassifierError, Error, Result};
pub use store::{Session, TaskListStore};
pub use task::TaskRecord;

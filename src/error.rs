//! Error types for planning and classification.

use std::io::Error as IoError;

use thiserror::Error;

/// Result type for planner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the zero-shot classification backend.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Classifier initialization failed: {0}")]
    Init(String),
}

impl ClassifierError {
    /// Whether trying again later might succeed (model still loading, rate limits, outages).
    pub fn is_transient(&self) -> bool {
        match self {
            ClassifierError::Network(_) => true,
            ClassifierError::Api { status, .. } => *status == 429 || *status >= 500,
            ClassifierError::InvalidResponse(_) => false,
            ClassifierError::Init(_) => false,
        }
    }
}

/// Errors surfaced to the CLI and TUI.
#[derive(Debug, Error)]
pub enum Error {
    /// Segmentation found nothing worth planning.
    #[error("No tasks found in input")]
    InputEmpty,

    /// The classifier could not be initialised or failed on a call.
    #[error("Classification unavailable: {0}")]
    ClassificationUnavailable(#[from] ClassifierError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

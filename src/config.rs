//! Configuration loading.
//!
//! Settings come from a YAML file. Every field has a default, so a partial
//! file (or no file at all) is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierConfig,
    pub planner: PlannerConfig,
}

/// Zero-shot classification backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Model identifier on the inference service.
    pub model: String,
    /// Base URL the model identifier is appended to.
    pub endpoint: String,
    /// Environment variable holding the API token.
    pub api_key_env: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: "valhalla/distilbart-mnli-12-1".to_string(),
            endpoint: "https://router.huggingface.co/hf-inference/models".to_string(),
            api_key_env: "HF_TOKEN".to_string(),
            timeout_ms: 60_000,
        }
    }
}

impl ClassifierConfig {
    /// Full URL of the model's inference endpoint.
    pub fn model_url(&self) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), self.model)
    }

    /// API token from the configured environment variable, if set and non-empty.
    pub fn get_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok().filter(|k| !k.trim().is_empty())
    }
}

/// Planning behaviour defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Whether urgent-sounding tasks are boosted to High priority.
    pub boost_urgent: bool,
    /// Greeting name; when set the welcome screen is skipped.
    pub username: Option<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            boost_urgent: true,
            username: None,
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            debug!(path = %config_path.display(), "Config::load: explicit path");
            return Self::load_from_file(config_path);
        }

        let default_paths = [
            dirs::config_dir().map(|p| p.join("day-assistant").join("config.yml")),
            Some(PathBuf::from("day-assistant.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                debug!(path = %path.display(), "Config::load: found default config");
                return Self::load_from_file(path);
            }
        }

        debug!("Config::load: no config file, using defaults");
        Ok(Config::default())
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.classifier.model.trim().is_empty() {
            return Err(Error::Config("classifier.model must not be empty".to_string()));
        }
        if self.classifier.endpoint.trim().is_empty() {
            return Err(Error::Config("classifier.endpoint must not be empty".to_string()));
        }
        if self.classifier.timeout_ms == 0 {
            return Err(Error::Config("classifier.timeout_ms must be greater than zero".to_string()));
        }
        Ok(())
    }
}

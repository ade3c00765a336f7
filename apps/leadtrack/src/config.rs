//! # Configuration
//!
//! Optional TOML settings for the shell.
//!
//! Resolution order:
//! 1. `--config <path>` on the command line
//! 2. `LEADTRACK_CONFIG` environment variable
//! 3. built-in defaults
//!
//! Every key is optional; absent keys keep their default.
//!
//! ```toml
//! prompt = "leads> "
//! banner = true
//! overdue_alerts = true
//! ```

use leadtrack_core::LeadError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "LEADTRACK_CONFIG";

/// Shell settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt printed before each command line.
    pub prompt: String,
    /// Print the startup banner.
    pub banner: bool,
    /// Log overdue reminders after every change.
    pub overdue_alerts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "leads> ".to_string(),
            banner: true,
            overdue_alerts: true,
        }
    }
}

impl Config {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, LeadError> {
        toml::from_str(text).map_err(|e| LeadError::ConfigError(e.to_string()))
    }

    /// Read settings from a file.
    pub fn from_file(path: &Path) -> Result<Self, LeadError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| LeadError::IoError(format!("Read config {:?}: {}", path, e)))?;
        Self::from_toml_str(&text)
    }

    /// Resolve settings from an explicit path, then the environment, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, LeadError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim())),
            _ => Ok(Self::default()),
        }
    }
}

//! Environment-driven settings.
//!
//! Values come from the process environment, after an optional `.env` file
//! has been merged in. Every setting has a default, so an empty environment
//! yields a working configuration.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::feedback::RuleBook;

pub const RULES_PATH_VAR: &str = "LANGUAGEPEER_RULES_PATH";
pub const LOG_FILTER_VAR: &str = "LANGUAGEPEER_LOG";
pub const LOG_FORMAT_VAR: &str = "LANGUAGEPEER_LOG_FORMAT";

const DEFAULT_LOG_FILTER: &str = "info";

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Bunyan,
}

impl std::str::FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "bunyan" => Ok(LogFormat::Bunyan),
            other => Err(AppError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Custom JSON rule book; built-in rules when absent
    pub rules_path: Option<PathBuf>,
    /// `EnvFilter` directive string
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            rules_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl EngineSettings {
    /// Load settings, merging a `.env` file from the working directory first
    pub fn from_env() -> Result<Self, AppError> {
        match dotenv::dotenv() {
            Ok(path) => debug!("Merged environment from {:?}", path),
            // A missing .env file is the normal case
            Err(e) if e.not_found() => {}
            Err(e) => warn!("Ignoring unreadable .env file: {}", e),
        }
        Self::from_process_env()
    }

    /// Load settings after merging an explicit env file.
    ///
    /// Variables already set in the process win over the file.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        dotenv::from_path(path)
            .map_err(|e| AppError::Config(format!("Failed to read env file {:?}: {}", path, e)))?;
        debug!("Merged environment from {:?}", path);
        Self::from_process_env()
    }

    /// Load settings from the process environment only
    pub fn from_process_env() -> Result<Self, AppError> {
        let log_format = match non_empty_var(LOG_FORMAT_VAR) {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            rules_path: non_empty_var(RULES_PATH_VAR).map(PathBuf::from),
            log_filter: non_empty_var(LOG_FILTER_VAR)
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            log_format,
        })
    }
}

/// Rule book selected by the settings
pub fn load_rule_book(settings: &EngineSettings) -> Result<Arc<RuleBook>, AppError> {
    match &settings.rules_path {
        Some(path) => RuleBook::from_file(path).map(Arc::new).map_err(|e| {
            warn!("Failed to load rule book {:?}: {}", path, e);
            e
        }),
        None => {
            info!("Using built-in rule book");
            Ok(RuleBook::builtin())
        }
    }
}

use crate::timer::DEFAULT_ADVANCE_DELAY;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DECK_DIR: &str = "quizzes";
pub const DEFAULT_LOG_FILE: &str = "quiz_debug.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub deck_dir: PathBuf,
    pub advance_delay: Duration,
    pub shuffle: bool,
    /// `None` disables logging.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            deck_dir: PathBuf::from(DEFAULT_DECK_DIR),
            advance_delay: DEFAULT_ADVANCE_DELAY,
            shuffle: false,
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("QUIZ_ADVANCE_DELAY_MS must be a whole number of milliseconds, got {0:?}")]
    InvalidDelay(String),

    #[error("QUIZ_SHUFFLE must be a boolean, got {0:?}")]
    InvalidFlag(String),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("QUIZ_DECK_DIR").filter(|d| !d.trim().is_empty()) {
            config.deck_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup("QUIZ_ADVANCE_DELAY_MS") {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidDelay(raw.clone()))?;
            config.advance_delay = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup("QUIZ_SHUFFLE") {
            config.shuffle = parse_flag(&raw).ok_or(ConfigError::InvalidFlag(raw))?;
        }

        if let Some(path) = lookup("QUIZ_LOG_FILE") {
            config.log_file = if path.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

//! Logging configuration and subscriber setup

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{WebvidError, WebvidResult};

/// Verbosity selected with `-v/--verbosity`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Nothing at all
    Quiet,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// General information
    #[default]
    Info,
    /// Debug information
    Debug,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level_str: &str) -> WebvidResult<Self> {
        match level_str.trim().to_lowercase().as_str() {
            "quiet" => Ok(LogLevel::Quiet),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "verbose" => Ok(LogLevel::Debug),
            _ => Err(WebvidError::argument(format!(
                "Invalid verbosity: {}. Valid levels: quiet, error, warn, info, debug",
                level_str
            ))),
        }
    }

    /// `EnvFilter` directive for this level
    pub fn filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Matching ffmpeg `-v` loglevel name
    pub fn transcoder_level(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Error => "error",
            LogLevel::Warn => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

/// Logging configuration options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggingConfig {
    /// Global log level
    pub level: LogLevel,
    /// Append to this file instead of standard error
    pub logfile: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn new(level: LogLevel, logfile: Option<PathBuf>) -> Self {
        Self { level, logfile }
    }

    /// Filter honouring `RUST_LOG` first, then the configured level
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.filter_directive()))
    }
}

/// Install the global tracing subscriber.
///
/// Calling this twice is harmless; the second subscriber is discarded.
pub fn init_logging(config: &LoggingConfig) -> WebvidResult<()> {
    match &config.logfile {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    WebvidError::argument(format!(
                        "Cannot open logfile {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(config.env_filter())
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(config.env_filter())
                .with_writer(std::io::stderr)
                .try_init();
        }
    }

    tracing::debug!("Logging initialized with level: {:?}", config.level);
    Ok(())
}

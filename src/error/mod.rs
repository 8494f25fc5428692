//! Error handling module for WebVid

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for WebVid operations
#[derive(Error, Debug)]
pub enum WebvidError {
    /// Invalid or conflicting command-line arguments
    #[error("Invalid arguments: {message}")]
    Argument { message: String },

    /// Inspection tool failed or its output could not be parsed
    #[error("Failed to read metadata from {}: {message}", path.display())]
    Metadata { path: PathBuf, message: String },

    /// Source reported a zero dimension
    #[error("Invalid geometry: cannot fit a {width}x{height} source into {box_width}x{box_height}")]
    InvalidGeometry {
        width: u32,
        height: u32,
        box_width: u32,
        box_height: u32,
    },

    /// Transcoder exited non-zero for a (file, format) pair
    #[error("Conversion of {} to {format} failed: {message}", path.display())]
    Conversion {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// Output directory creation, backup rename or staging move failed
    #[error("Filesystem error on {}: {message}", path.display())]
    Filesystem { path: PathBuf, message: String },

    /// External tool could not be started
    #[error("Failed to start {program}: {source}")]
    ProcessSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// External tool did not finish in time
    #[error("{program} did not finish within {seconds}s")]
    ProcessTimeout { program: String, seconds: u64 },

    /// Configuration file or override could not be applied
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WebvidError {
    /// Shorthand for an argument error
    pub fn argument(message: impl Into<String>) -> Self {
        WebvidError::Argument {
            message: message.into(),
        }
    }

    /// Shorthand for a filesystem error on a path
    pub fn filesystem(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        WebvidError::Filesystem {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Errors that abort the run before any job starts
    pub fn is_usage_error(&self) -> bool {
        matches!(self, WebvidError::Argument { .. } | WebvidError::Config { .. })
    }
}

/// Result type alias for WebVid operations
pub type WebvidResult<T> = std::result::Result<T, WebvidError>;

// Ports - Interface definitions (contracts)

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::WebvidResult;

/// A fully assembled external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    /// Passed to the process as-is; paths need not be valid UTF-8
    pub args: Vec<OsString>,
    /// Upper bound on the run time, `None` waits forever
    pub timeout: Option<Duration>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a flag followed by its value
    pub fn opt(self, flag: &str, value: impl Into<OsString>) -> Self {
        self.arg(flag).arg(value)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Last argument, which is the output path for transcoder commands
    pub fn last_arg(&self) -> Option<&OsStr> {
        self.args.last().map(OsString::as_os_str)
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(&arg.to_string_lossy()))?;
        }
        Ok(())
    }
}

/// Quote an argument so the printed command can be pasted into a shell.
///
/// Non UTF-8 bytes are shown as U+FFFD; the printed form is for display only.
fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}

/// Captured result of a finished external command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code, `None` when terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Short failure description for logs
    pub fn failure_summary(&self) -> String {
        let code = match self.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        };
        match self.stderr.lines().rev().find(|l| !l.trim().is_empty()) {
            Some(line) => format!("{}: {}", code, line.trim()),
            None => code,
        }
    }
}

/// Port for running external tools
#[async_trait]
pub trait ProcessPort: Send + Sync {
    /// Run the command to completion and capture its output
    async fn invoke(&self, command: &ToolCommand) -> WebvidResult<ProcessOutput>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if a file exists
    async fn file_exists(&self, path: &Path) -> WebvidResult<bool>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, path: &Path) -> WebvidResult<()>;

    /// Move a file, replacing the destination
    async fn move_file(&self, from: &Path, to: &Path) -> WebvidResult<()>;

    /// Delete a file
    async fn delete_file(&self, path: &Path) -> WebvidResult<()>;
}

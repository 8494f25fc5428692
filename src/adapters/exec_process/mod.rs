//! Subprocess adapter built on tokio::process

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{WebvidError, WebvidResult};
use crate::ports::{ProcessOutput, ProcessPort, ToolCommand};

/// Runs external tools and waits for them, honouring the command timeout
#[derive(Debug, Default)]
pub struct TokioProcessAdapter;

impl TokioProcessAdapter {
    /// Create new process adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessPort for TokioProcessAdapter {
    async fn invoke(&self, command: &ToolCommand) -> WebvidResult<ProcessOutput> {
        debug!("Running: {}", command);

        let mut process = Command::new(&command.program);
        process
            .args(&command.args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        // Dropping the future on timeout kills the child
        let output = match command.timeout {
            Some(limit) => tokio::time::timeout(limit, process.output())
                .await
                .map_err(|_| WebvidError::ProcessTimeout {
                    program: command.program.clone(),
                    seconds: limit.as_secs(),
                })?,
            None => process.output().await,
        }
        .map_err(|source| WebvidError::ProcessSpawn {
            program: command.program.clone(),
            source,
        })?;

        let result = ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!("{} exited with {:?}", command.program, result.exit_code);
        Ok(result)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_captures_output_and_exit_code() {
        let command = ToolCommand::new("sh").opt("-c", "echo out; echo err >&2; exit 3");

        let output = TokioProcessAdapter::new().invoke(&command).await.unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
        assert!(!output.success());
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let command = ToolCommand::new("sleep")
            .arg("5")
            .with_timeout(Duration::from_millis(100));

        let err = TokioProcessAdapter::new().invoke(&command).await.unwrap_err();
        assert!(matches!(err, WebvidError::ProcessTimeout { .. }));
    }

    #[tokio::test]
    async fn test_missing_program_is_a_spawn_error() {
        let command = ToolCommand::new("webvid-no-such-tool-here");

        let err = TokioProcessAdapter::new().invoke(&command).await.unwrap_err();
        assert!(matches!(err, WebvidError::ProcessSpawn { .. }));
    }
}

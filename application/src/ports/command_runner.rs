//! Command runner port
//!
//! Defines the interface for running a fully expanded argument vector,
//! either on the local host or through a remote shell transport.
//!
//! # Architecture
//!
//! - **Port**: [`CommandRunnerPort`] - defined here in application layer
//! - **Adapters**: `LocalCommandRunner`, `SshCommandRunner` - infrastructure layer

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while running a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunnerError {
    /// The process could not be started
    #[error("failed to start {program}: {message}")]
    Spawn { program: String, message: String },

    /// The process ran and exited unsuccessfully
    #[error("command failed with {status}{}", stderr_suffix(.stderr))]
    Failed { status: String, stderr: String },

    /// The remote transport could not be established
    #[error("connection failed: {0}")]
    Connection(String),

    /// The runner cannot be used in this environment (e.g. missing binary)
    #[error("runner unavailable: {0}")]
    Unavailable(String),
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Port for command execution
///
/// `argv[0]` is the program, the rest are its arguments. Arguments are never
/// interpreted by a shell on the local side.
#[async_trait]
pub trait CommandRunnerPort: Send + Sync {
    /// Run the command with its output streamed to this process's stdio
    async fn execute(&self, argv: &[String]) -> Result<(), RunnerError>;

    /// Run the command and return its captured standard output.
    ///
    /// On a non-zero exit the captured standard error is carried in
    /// [`RunnerError::Failed`].
    async fn execute_with_output(&self, argv: &[String]) -> Result<String, RunnerError>;

    /// Release any transport resources
    async fn close(&self) -> Result<(), RunnerError> {
        Ok(())
    }

    /// Short human-readable description (e.g. `local` or `ssh deploy@host:22`)
    fn describe(&self) -> String;
}

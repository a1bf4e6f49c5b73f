//! Command runners
//!
//! Adapters for [`CommandRunnerPort`]:
//!
//! - [`LocalCommandRunner`] - child processes of this one
//! - [`SshCommandRunner`] - one `ssh` client process per command

mod local;
mod quote;
mod settings;
mod ssh;

pub use local::LocalCommandRunner;
pub use quote::{join_command, shell_quote};
pub use settings::{SshOverrides, SshSettings};
pub use ssh::SshCommandRunner;

use operations_application::ports::command_runner::{CommandRunnerPort, RunnerError};
use std::process::Output;
use std::sync::Arc;

/// Build the runner for this invocation
pub async fn create_runner(
    remote: bool,
    settings: SshSettings,
) -> Result<Arc<dyn CommandRunnerPort>, RunnerError> {
    if remote {
        Ok(Arc::new(SshCommandRunner::connect(settings).await?))
    } else {
        Ok(Arc::new(LocalCommandRunner::new()))
    }
}

fn split_program(argv: &[String]) -> Result<(&String, &[String]), RunnerError> {
    argv.split_first().ok_or_else(|| RunnerError::Spawn {
        program: String::new(),
        message: "empty command".to_string(),
    })
}

/// Stdout on success, otherwise the exit status with stderr
fn collect_output(output: Output) -> Result<String, RunnerError> {
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(RunnerError::Failed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

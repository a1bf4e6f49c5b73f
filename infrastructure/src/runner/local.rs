//! Local command runner

use super::{collect_output, split_program};
use async_trait::async_trait;
use operations_application::ports::command_runner::{CommandRunnerPort, RunnerError};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs commands as child processes of this one
#[derive(Debug, Clone, Default)]
pub struct LocalCommandRunner;

impl LocalCommandRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(argv: &[String]) -> Result<Command, RunnerError> {
        let (program, args) = split_program(argv)?;
        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::inherit());
        Ok(cmd)
    }
}

#[async_trait]
impl CommandRunnerPort for LocalCommandRunner {
    async fn execute(&self, argv: &[String]) -> Result<(), RunnerError> {
        debug!(command = ?argv, "Spawning local process");
        let status = Self::command(argv)?
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| RunnerError::Spawn {
                program: argv[0].clone(),
                message: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(RunnerError::Failed {
                status: status.to_string(),
                stderr: String::new(),
            })
        }
    }

    async fn execute_with_output(&self, argv: &[String]) -> Result<String, RunnerError> {
        let output = Self::command(argv)?
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| RunnerError::Spawn {
                program: argv[0].clone(),
                message: e.to_string(),
            })?;

        collect_output(output)
    }

    fn describe(&self) -> String {
        "local".to_string()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_capture_stdout() {
        let runner = LocalCommandRunner::new();
        let output = runner
            .execute_with_output(&argv(&["echo", "hello", "world"]))
            .await
            .unwrap();
        assert_eq!(output, "hello world\n");
    }

    #[tokio::test]
    async fn test_arguments_are_not_shell_interpreted() {
        let runner = LocalCommandRunner::new();
        let output = runner
            .execute_with_output(&argv(&["echo", "$HOME;", "*"]))
            .await
            .unwrap();
        assert_eq!(output, "$HOME; *\n");
    }

    #[tokio::test]
    async fn test_failure_carries_stderr() {
        let runner = LocalCommandRunner::new();
        let err = runner
            .execute_with_output(&argv(&["sh", "-c", "echo oops >&2; exit 3"]))
            .await
            .unwrap_err();
        match err {
            RunnerError::Failed { status, stderr } => {
                assert!(status.contains('3'));
                assert_eq!(stderr, "oops\n");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_streaming_reports_exit_status() {
        let runner = LocalCommandRunner::new();
        assert!(runner.execute(&argv(&["true"])).await.is_ok());
        assert!(matches!(
            runner.execute(&argv(&["false"])).await,
            Err(RunnerError::Failed { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let runner = LocalCommandRunner::new();
        let err = runner
            .execute(&argv(&["definitely-not-a-real-program-42"]))
            .await
            .unwrap_err();
        assert!(matches!(err, RunnerError::Spawn { ref program, .. } if program == "definitely-not-a-real-program-42"));
    }

    #[tokio::test]
    async fn test_empty_argv() {
        let runner = LocalCommandRunner::new();
        assert!(runner.execute(&[]).await.is_err());
    }
}

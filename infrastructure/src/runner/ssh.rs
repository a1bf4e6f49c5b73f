//! Remote command runner over the system OpenSSH client
//!
//! Each command is its own `ssh` process: the argv is shell-quoted into one
//! remote command line and handed to the remote login shell. Authentication
//! is whatever the ssh client is configured for, restricted to non-interactive
//! methods (`BatchMode=yes`).

use super::quote::join_command;
use super::settings::SshSettings;
use super::{collect_output, split_program};
use async_trait::async_trait;
use operations_application::ports::command_runner::{CommandRunnerPort, RunnerError};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

pub struct SshCommandRunner {
    program: PathBuf,
    settings: SshSettings,
}

impl SshCommandRunner {
    /// Create a runner with an explicit client binary; no connection is made
    pub fn new(program: impl Into<PathBuf>, settings: SshSettings) -> Self {
        Self {
            program: program.into(),
            settings,
        }
    }

    /// Locate `ssh`, check the settings and probe the host once
    pub async fn connect(settings: SshSettings) -> Result<Self, RunnerError> {
        settings.validate()?;
        let program = which::which("ssh")
            .map_err(|e| RunnerError::Unavailable(format!("ssh client not found: {}", e)))?;

        let runner = Self::new(program, settings);
        runner.probe().await?;
        info!(remote = %runner.settings.target(), "SSH connection established");
        Ok(runner)
    }

    /// Arguments passed to the ssh client for one remote command
    pub fn remote_args(&self, argv: &[String]) -> Vec<String> {
        let mut args = self.settings.ssh_options();
        // Hosts starting with `-` must not be read as options
        args.push("--".to_string());
        args.push(self.settings.host.clone());
        args.push(join_command(argv));
        args
    }

    fn command(&self, argv: &[String]) -> Result<Command, RunnerError> {
        split_program(argv)?;
        let mut cmd = Command::new(&self.program);
        cmd.args(self.remote_args(argv));
        Ok(cmd)
    }

    async fn probe(&self) -> Result<(), RunnerError> {
        debug!(remote = %self.settings.target(), "Probing SSH connection");
        let output = Command::new(&self.program)
            .args(self.remote_args(&["true".to_string()]))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(RunnerError::Connection(format!(
                "failed to connect to {}: {}",
                self.settings.target(),
                stderr.trim()
            )))
        }
    }

    fn spawn_error(&self, e: std::io::Error) -> RunnerError {
        RunnerError::Spawn {
            program: self.program.display().to_string(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl CommandRunnerPort for SshCommandRunner {
    async fn execute(&self, argv: &[String]) -> Result<(), RunnerError> {
        debug!(remote = %self.settings.target(), command = ?argv, "Running remote command");
        let status = self
            .command(argv)?
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

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
        let output = self
            .command(argv)?
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        collect_output(output)
    }

    async fn close(&self) -> Result<(), RunnerError> {
        debug!(remote = %self.settings.target(), "Closing SSH runner");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("ssh {}", self.settings.target())
    }
}

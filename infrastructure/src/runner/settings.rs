//! Remote shell connection settings
//!
//! Precedence (highest to lowest): command-line flags, the `ssh:` section of
//! the config file, built-in defaults.

use crate::config::FileSshConfig;
use operations_application::ports::command_runner::RunnerError;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SSH_PORT: u16 = 22;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolved settings for the ssh runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub key_path: Option<PathBuf>,
    pub verify_host: bool,
    pub known_hosts_path: Option<PathBuf>,
    pub timeout: Duration,
}

/// Values given on the command line; `None` keeps the lower layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub key: Option<String>,
    pub verify_host: Option<bool>,
    pub timeout_secs: Option<u64>,
}

impl Default for SshSettings {
    fn default() -> Self {
        let home = dirs::home_dir();
        let ssh_dir = home.as_ref().map(|h| h.join(".ssh"));

        Self {
            host: String::new(),
            port: DEFAULT_SSH_PORT,
            user: current_user(),
            key_path: ssh_dir.as_deref().map(default_key_path),
            verify_host: true,
            known_hosts_path: ssh_dir.map(|d| d.join("known_hosts")),
            timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl SshSettings {
    /// Defaults overlaid with the config file section
    pub fn from_file(file: Option<&FileSshConfig>) -> Self {
        let mut settings = Self::default();
        let Some(file) = file else {
            return settings;
        };

        if let Some(host) = file.host.as_ref().filter(|h| !h.is_empty()) {
            settings.host = host.clone();
        }
        if let Some(port) = file.port.filter(|p| *p > 0) {
            settings.port = port;
        }
        if let Some(user) = file.user.as_ref().filter(|u| !u.is_empty()) {
            settings.user = user.clone();
        }
        if let Some(key) = file.key.as_ref().filter(|k| !k.is_empty()) {
            settings.key_path = Some(expand_home(key));
        }
        if let Some(verify) = file.verify_host {
            settings.verify_host = verify;
        }
        if let Some(path) = file.host_key_path.as_ref().filter(|p| !p.is_empty()) {
            settings.known_hosts_path = Some(expand_home(path));
        }
        if let Some(secs) = file.timeout.filter(|s| *s > 0) {
            settings.timeout = Duration::from_secs(secs);
        }
        settings
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, overrides: &SshOverrides) -> Self {
        if let Some(host) = overrides.host.as_ref().filter(|h| !h.is_empty()) {
            self.host = host.clone();
        }
        if let Some(port) = overrides.port.filter(|p| *p > 0) {
            self.port = port;
        }
        if let Some(user) = overrides.user.as_ref().filter(|u| !u.is_empty()) {
            self.user = user.clone();
        }
        if let Some(key) = overrides.key.as_ref().filter(|k| !k.is_empty()) {
            self.key_path = Some(expand_home(key));
        }
        if let Some(verify) = overrides.verify_host {
            self.verify_host = verify;
        }
        if let Some(secs) = overrides.timeout_secs.filter(|s| *s > 0) {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }

    pub fn validate(&self) -> Result<(), RunnerError> {
        if self.host.is_empty() {
            return Err(RunnerError::Connection(
                "SSH host is required for remote execution".to_string(),
            ));
        }
        Ok(())
    }

    /// `user@host:port`
    pub fn target(&self) -> String {
        if self.user.is_empty() {
            format!("{}:{}", self.host, self.port)
        } else {
            format!("{}@{}:{}", self.user, self.host, self.port)
        }
    }

    /// OpenSSH client options for these settings
    pub fn ssh_options(&self) -> Vec<String> {
        let mut options = vec!["-p".to_string(), self.port.to_string()];

        if !self.user.is_empty() {
            options.push("-l".to_string());
            options.push(self.user.clone());
        }
        if let Some(key) = &self.key_path {
            options.push("-i".to_string());
            options.push(key.display().to_string());
        }

        let mut push_option = |option: String| {
            options.push("-o".to_string());
            options.push(option);
        };
        push_option("BatchMode=yes".to_string());
        push_option(format!("ConnectTimeout={}", self.timeout.as_secs().max(1)));
        if self.verify_host {
            push_option("StrictHostKeyChecking=yes".to_string());
            if let Some(path) = &self.known_hosts_path {
                push_option(format!("UserKnownHostsFile={}", path.display()));
            }
        } else {
            push_option("StrictHostKeyChecking=no".to_string());
            push_option("UserKnownHostsFile=/dev/null".to_string());
        }
        options
    }
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
}

/// `id_rsa`, unless only `id_ed25519` exists
fn default_key_path(ssh_dir: &Path) -> PathBuf {
    let rsa = ssh_dir.join("id_rsa");
    let ed25519 = ssh_dir.join("id_ed25519");
    if !rsa.exists() && ed25519.exists() {
        ed25519
    } else {
        rsa
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

//! Remote shell configuration (`ssh:` section)
//!
//! Every field is optional; unset fields fall back to the runner defaults
//! (see `SshSettings`).
//!
//! ```yaml
//! ssh:
//!   host: bastion.example.com
//!   port: 2222
//!   user: deploy
//!   key: ~/.ssh/id_ed25519
//!   verify_host: false
//!   timeout: 30
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSshConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Accepted for compatibility; password authentication is not supported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Private key path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_host: Option<bool>,
    /// known_hosts path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_key_path: Option<String>,
    /// Connection timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

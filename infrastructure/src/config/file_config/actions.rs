//! Danger actions configuration (`actions:` list)
//!
//! Example configuration:
//!
//! ```yaml
//! actions:
//!   - danger_level: high
//!     type: confirm
//!     message: "This is a high danger operation. Proceed?"
//!   - danger_level: medium
//!     type: timeout
//!     timeout: 5
//!   - danger_level: low
//!     type: force
//! ```

use operations_domain::{DangerAction, DomainError};
use serde::{Deserialize, Serialize};

/// One danger action as written in the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileActionConfig {
    pub danger_level: String,
    /// `confirm`, `timeout` or `force`
    #[serde(rename = "type")]
    pub action_type: String,
    pub message: String,
    /// Seconds to wait; only used by `timeout`
    pub timeout: i64,
}

impl FileActionConfig {
    pub fn to_domain(&self) -> Result<DangerAction, DomainError> {
        DangerAction::parse(
            self.danger_level.clone(),
            &self.action_type,
            Some(self.message.clone()),
            self.timeout,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use operations_domain::DangerPolicy;

    #[test]
    fn test_to_domain_timeout() {
        let action = FileActionConfig {
            danger_level: "medium".into(),
            action_type: "timeout".into(),
            message: String::new(),
            timeout: 5,
        };
        assert_eq!(
            action.to_domain().unwrap().policy,
            DangerPolicy::Timeout {
                message: None,
                seconds: 5
            }
        );
    }

    #[test]
    fn test_to_domain_unknown_type() {
        let action = FileActionConfig {
            danger_level: "high".into(),
            action_type: "invalid".into(),
            ..Default::default()
        };
        assert_eq!(
            action.to_domain().unwrap_err(),
            DomainError::UnknownActionType("invalid".into())
        );
    }
}

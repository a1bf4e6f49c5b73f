//! Danger action entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::core::error::DomainError;

/// Kind of gate configured for a danger level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DangerActionKind {
    /// Ask for interactive confirmation
    Confirm,
    /// Announce, wait a fixed number of seconds, then proceed
    Timeout,
    /// Announce and proceed immediately
    Force,
}

impl DangerActionKind {
    pub fn as_str(&self) -> &str {
        match self {
            DangerActionKind::Confirm => "confirm",
            DangerActionKind::Timeout => "timeout",
            DangerActionKind::Force => "force",
        }
    }
}

impl FromStr for DangerActionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirm" => Ok(DangerActionKind::Confirm),
            "timeout" => Ok(DangerActionKind::Timeout),
            "force" => Ok(DangerActionKind::Force),
            other => Err(DomainError::UnknownActionType(other.to_string())),
        }
    }
}

impl std::fmt::Display for DangerActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Gate policy with the fields each kind needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DangerPolicy {
    Confirm { message: Option<String> },
    Timeout { message: Option<String>, seconds: u64 },
    Force { message: Option<String> },
}

impl DangerPolicy {
    pub fn kind(&self) -> DangerActionKind {
        match self {
            DangerPolicy::Confirm { .. } => DangerActionKind::Confirm,
            DangerPolicy::Timeout { .. } => DangerActionKind::Timeout,
            DangerPolicy::Force { .. } => DangerActionKind::Force,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            DangerPolicy::Confirm { message }
            | DangerPolicy::Timeout { message, .. }
            | DangerPolicy::Force { message } => message.as_deref(),
        }
    }
}

/// Gate configured for one danger level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DangerAction {
    pub danger_level: String,
    pub policy: DangerPolicy,
}

impl DangerAction {
    pub fn new(danger_level: impl Into<String>, policy: DangerPolicy) -> Self {
        Self {
            danger_level: danger_level.into(),
            policy,
        }
    }

    /// Build an action from its configuration form.
    ///
    /// Fails with `UnknownActionType` for kinds other than confirm, timeout
    /// and force, and with `InvalidTimeout` for a timeout action without a
    /// positive number of seconds. Empty messages count as absent.
    pub fn parse(
        danger_level: impl Into<String>,
        kind: &str,
        message: Option<String>,
        timeout_seconds: i64,
    ) -> Result<Self, DomainError> {
        let danger_level = danger_level.into();
        let message = message.filter(|m| !m.is_empty());

        let policy = match kind.parse::<DangerActionKind>()? {
            DangerActionKind::Confirm => DangerPolicy::Confirm { message },
            DangerActionKind::Force => DangerPolicy::Force { message },
            DangerActionKind::Timeout => {
                if timeout_seconds <= 0 {
                    return Err(DomainError::InvalidTimeout(danger_level));
                }
                DangerPolicy::Timeout {
                    message,
                    seconds: timeout_seconds as u64,
                }
            }
        };

        Ok(Self {
            danger_level,
            policy,
        })
    }
}

/// Configured actions keyed by danger level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DangerActions {
    actions: HashMap<String, DangerAction>,
}

impl DangerActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the mapping; a later action for the same level replaces an earlier one
    pub fn from_actions(actions: impl IntoIterator<Item = DangerAction>) -> Self {
        let mut map = HashMap::new();
        for action in actions {
            map.insert(action.danger_level.clone(), action);
        }
        Self { actions: map }
    }

    pub fn register(mut self, action: DangerAction) -> Self {
        self.actions.insert(action.danger_level.clone(), action);
        self
    }

    pub fn get(&self, danger_level: &str) -> Option<&DangerAction> {
        self.actions.get(danger_level)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

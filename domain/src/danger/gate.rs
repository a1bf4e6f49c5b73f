//! Gate planning
//!
//! Deciding *what* a gate does for a danger level is pure; doing it
//! (prompting, sleeping, printing) belongs to the application layer.
//!
//! ```text
//! ""            → PassThrough               → Approved
//! unconfigured  → Unconfigured (warn)       → Approved
//! confirm       → Confirm { prompt }        → Approved | Rejected
//! timeout       → Delay { message, secs }   → Approved after secs
//! force         → Announce { message }      → Approved
//! ```

use super::entities::{DangerActions, DangerPolicy};

/// What the gate has to do for one danger level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateStep {
    /// No danger level; nothing to do
    PassThrough,
    /// Level has no configured action; warn and proceed
    Unconfigured { danger_level: String },
    /// Show the prompt and wait for a yes/no answer
    Confirm { prompt: String },
    /// Show the message, then count down before proceeding
    Delay { message: String, seconds: u64 },
    /// Show the message and proceed
    Announce { message: String },
}

/// Final decision of a gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Approved,
    Rejected,
}

impl DangerActions {
    /// Plan the gate for a danger level
    pub fn plan(&self, danger_level: &str) -> GateStep {
        if danger_level.is_empty() {
            return GateStep::PassThrough;
        }

        let Some(action) = self.get(danger_level) else {
            return GateStep::Unconfigured {
                danger_level: danger_level.to_string(),
            };
        };

        match &action.policy {
            DangerPolicy::Confirm { message } => GateStep::Confirm {
                prompt: message.clone().unwrap_or_else(|| {
                    format!(
                        "This operation has danger level {}. Do you want to proceed? (y/n): ",
                        danger_level
                    )
                }),
            },
            DangerPolicy::Timeout { message, seconds } => GateStep::Delay {
                message: message.clone().unwrap_or_else(|| {
                    format!(
                        "This operation has danger level {}. It will proceed in {} seconds. Press Ctrl+C to cancel.",
                        danger_level, seconds
                    )
                }),
                seconds: *seconds,
            },
            DangerPolicy::Force { message } => GateStep::Announce {
                message: message.clone().unwrap_or_else(|| {
                    format!("Warning: This operation has danger level {}.", danger_level)
                }),
            },
        }
    }
}

/// Whether a confirmation answer means yes (`y` / `yes`, any case, trimmed)
pub fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

//! Danger gate service
//!
//! Executes the [`GateStep`] planned by the domain for a danger level:
//! prompting through the [`GatePromptPort`], counting down on the tokio
//! clock, and listening on a [`CancellationToken`] while it waits.

use crate::ports::gate_prompt::{GatePromptError, GatePromptPort};
use operations_domain::{is_affirmative, DangerActions, GateOutcome, GateStep};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that stop the gate without a decision
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// Reading the confirmation answer failed
    #[error("failed to read confirmation: {0}")]
    Prompt(#[from] GatePromptError),

    /// The wait was interrupted (Ctrl+C)
    #[error("cancelled while gating danger level {0}")]
    Cancelled(String),
}

/// Authorizes danger levels against the configured actions
#[derive(Clone)]
pub struct DangerGate {
    actions: Arc<DangerActions>,
    prompt: Arc<dyn GatePromptPort>,
}

impl DangerGate {
    pub fn new(actions: Arc<DangerActions>, prompt: Arc<dyn GatePromptPort>) -> Self {
        Self { actions, prompt }
    }

    /// Decide whether an operation at `danger_level` may proceed.
    ///
    /// Returns `Rejected` only for a declined confirmation. Every other
    /// configured policy ends in `Approved`; so does a level with no
    /// configured action, after a warning.
    pub async fn authorize(
        &self,
        danger_level: &str,
        cancel: &CancellationToken,
    ) -> Result<GateOutcome, GateError> {
        match self.actions.plan(danger_level) {
            GateStep::PassThrough => Ok(GateOutcome::Approved),

            GateStep::Unconfigured { danger_level } => {
                warn!(danger_level = %danger_level, "No action configured for danger level");
                self.prompt.warn(&format!(
                    "Warning: No action defined for danger level {}",
                    danger_level
                ));
                Ok(GateOutcome::Approved)
            }

            GateStep::Confirm { prompt } => {
                debug!(danger_level, "Awaiting confirmation");
                let answer = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        return Err(GateError::Cancelled(danger_level.to_string()));
                    }
                    answer = self.prompt.confirm(&prompt) => answer?,
                };

                if is_affirmative(&answer) {
                    info!(danger_level, "Operation confirmed");
                    Ok(GateOutcome::Approved)
                } else {
                    info!(danger_level, "Operation declined");
                    Ok(GateOutcome::Rejected)
                }
            }

            GateStep::Delay { message, seconds } => {
                self.prompt.announce(&message);
                for remaining in (1..=seconds).rev() {
                    self.prompt.countdown(remaining);
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            return Err(GateError::Cancelled(danger_level.to_string()));
                        }
                        _ = tokio::time::sleep(Duration::from_secs(1)) => {}
                    }
                }
                self.prompt.countdown_finished();
                debug!(danger_level, seconds, "Countdown elapsed");
                Ok(GateOutcome::Approved)
            }

            GateStep::Announce { message } => {
                self.prompt.announce(&message);
                Ok(GateOutcome::Approved)
            }
        }
    }
}

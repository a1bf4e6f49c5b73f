//! Gate prompt port
//!
//! The danger gate talks to the operator only through this port, so the
//! confirm/countdown logic can be driven by a terminal adapter in the
//! presentation layer or by a scripted double in tests.
//!
//! # Flow
//!
//! ```text
//! confirm  → confirm(prompt) → one line of input
//! timeout  → announce(message) → countdown(n) … countdown(1) → countdown_finished()
//! force    → announce(message)
//! unknown  → warn(message)
//! ```

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while talking to the operator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatePromptError {
    /// Input stream closed before an answer was read
    #[error("input closed before an answer was given")]
    Closed,

    /// Reading or writing the terminal failed
    #[error("I/O error: {0}")]
    Io(String),
}

/// Port for operator interaction during danger gating
#[async_trait]
pub trait GatePromptPort: Send + Sync {
    /// Show the prompt and read one line of input (without the line terminator)
    async fn confirm(&self, prompt: &str) -> Result<String, GatePromptError>;

    /// Show an informational line (timeout and force policies)
    fn announce(&self, message: &str);

    /// Show a warning line
    fn warn(&self, message: &str);

    /// Show the remaining seconds of a countdown
    fn countdown(&self, remaining_seconds: u64);

    /// Countdown reached zero
    fn countdown_finished(&self);
}

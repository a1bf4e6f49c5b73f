//! Application layer for operations
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use ports::{
    command_runner::{CommandRunnerPort, RunnerError},
    gate_prompt::{GatePromptError, GatePromptPort},
};
pub use use_cases::danger_gate::{DangerGate, GateError};
pub use use_cases::dispatch_tool::{
    run_command, DispatchOutcome, DispatchToolError, DispatchToolInput, DispatchToolUseCase,
};

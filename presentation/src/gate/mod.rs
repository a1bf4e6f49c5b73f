//! Operator interaction for danger gating

pub mod terminal;

pub use terminal::TerminalGatePrompt;

//! Command-line parsing

pub mod commands;
pub mod raw_args;
pub mod tool_commands;

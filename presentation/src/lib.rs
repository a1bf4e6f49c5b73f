//! Presentation layer for operations
//!
//! This crate contains CLI definitions, the dynamic tool subcommands,
//! the terminal danger-gate prompt and output formatting.

pub mod cli;
pub mod gate;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, ListFormat};
pub use cli::raw_args::{parse_raw_args, RawArgsError};
pub use cli::tool_commands::{select_tool, tool_subcommands, ToolSelection};
pub use gate::TerminalGatePrompt;
pub use output::console::ConsoleFormatter;

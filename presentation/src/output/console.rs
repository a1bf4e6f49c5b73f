//! Console messages for dispatch results

use colored::Colorize;
use operations_application::DispatchOutcome;

/// Formats dispatch results for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Text for stdout, if the outcome has any
    pub fn outcome(outcome: &DispatchOutcome) -> Option<String> {
        match outcome {
            DispatchOutcome::Executed {
                output: Some(output),
                ..
            } => Some(output.clone()),
            DispatchOutcome::Executed { output: None, .. } => None,
            DispatchOutcome::DryRun { argv } => Some(format!(
                "{} {}\n",
                "Would execute:".cyan().bold(),
                Self::command_line(argv)
            )),
            DispatchOutcome::Aborted { .. } => None,
        }
    }

    pub fn aborted() -> String {
        "operation aborted".yellow().to_string()
    }

    /// `Error: ...` line; pass `{:#}` formatted error chains
    pub fn error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    /// Space-joined argv, double-quoting tokens that need it
    pub fn command_line(argv: &[String]) -> String {
        argv.iter()
            .map(|token| {
                if token.is_empty() || token.contains(char::is_whitespace) || token.contains('"') {
                    format!("{:?}", token)
                } else {
                    token.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

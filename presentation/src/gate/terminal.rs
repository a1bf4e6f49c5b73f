//! Terminal adapter for the danger gate
//!
//! Prompts and countdowns go to stderr so a command's own stdout stays
//! clean when piped.
//!
//! ```text
//! This is a high danger operation. Are you sure you want to proceed? (y/N): y
//! This is a medium danger operation. Proceeding after 3 seconds...
//! Proceeding in 2 seconds...
//! ```
//!
//! Answers are read on a detached thread and handed back over a oneshot
//! channel. Dropping the `confirm` future (Ctrl+C) abandons the read without
//! holding up runtime shutdown.

use async_trait::async_trait;
use colored::Colorize;
use operations_application::ports::gate_prompt::{GatePromptError, GatePromptPort};
use std::io::{self, Write};
use std::thread;
use tokio::sync::oneshot;

/// Blocking line reader; returns bytes read, 0 at end of input
type ReadLine = fn(&mut String) -> io::Result<usize>;

fn read_stdin_line(buf: &mut String) -> io::Result<usize> {
    io::stdin().read_line(buf)
}

/// Reads answers from stdin, writes prompts to stderr
pub struct TerminalGatePrompt {
    read_line: ReadLine,
}

impl TerminalGatePrompt {
    pub fn new() -> Self {
        Self {
            read_line: read_stdin_line,
        }
    }

    #[cfg(test)]
    fn with_reader(read_line: ReadLine) -> Self {
        Self { read_line }
    }

    fn write_err(&self, text: &str) {
        let mut stderr = io::stderr().lock();
        let _ = stderr.write_all(text.as_bytes());
        let _ = stderr.flush();
    }

    async fn read_answer(&self) -> Result<Option<String>, GatePromptError> {
        let (tx, rx) = oneshot::channel();
        let read_line = self.read_line;
        thread::Builder::new()
            .name("gate-input".to_string())
            .spawn(move || {
                let mut line = String::new();
                let result = read_line(&mut line).map(|read| (read > 0).then_some(line));
                let _ = tx.send(result);
            })
            .map_err(|e| GatePromptError::Io(format!("Failed to start input reader: {}", e)))?;

        rx.await
            .map_err(|_| GatePromptError::Closed)?
            .map_err(|e| GatePromptError::Io(format!("Failed to read input: {}", e)))
    }
}

impl Default for TerminalGatePrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GatePromptPort for TerminalGatePrompt {
    async fn confirm(&self, prompt: &str) -> Result<String, GatePromptError> {
        self.write_err(&format!("{} ", prompt.yellow().bold()));

        match self.read_answer().await? {
            Some(line) => Ok(line.trim_end_matches(['\r', '\n']).to_string()),
            None => {
                // Keep the shell prompt off the question line
                self.write_err("\n");
                Err(GatePromptError::Closed)
            }
        }
    }

    fn announce(&self, message: &str) {
        self.write_err(&format!("{}\n", message.yellow()));
    }

    fn warn(&self, message: &str) {
        self.write_err(&format!("{}\n", message.red()));
    }

    fn countdown(&self, remaining_seconds: u64) {
        self.write_err(&format!("\rProceeding in {} seconds...", remaining_seconds));
    }

    fn countdown_finished(&self) {
        self.write_err(&format!("\r{}\n", "Proceeding now...        ".green()));
    }
}

//! Test doubles for the application ports

use crate::ports::command_runner::{CommandRunnerPort, RunnerError};
use crate::ports::gate_prompt::{GatePromptError, GatePromptPort};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Confirm(String),
    Announce(String),
    Warn(String),
    Countdown(u64),
    CountdownFinished,
}

/// Prompt that replays canned answers and records everything shown
#[derive(Default)]
pub struct ScriptedGatePrompt {
    answers: Mutex<VecDeque<Result<String, GatePromptError>>>,
    events: Mutex<Vec<PromptEvent>>,
    never_answer: bool,
}

impl ScriptedGatePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(answers: &[&str]) -> Self {
        let prompt = Self::new();
        for answer in answers {
            prompt.push_answer(Ok(answer.to_string()));
        }
        prompt
    }

    /// Prompt whose `confirm` never completes
    pub fn silent() -> Self {
        Self {
            never_answer: true,
            ..Self::default()
        }
    }

    pub fn push_answer(&self, answer: Result<String, GatePromptError>) {
        self.answers.lock().unwrap().push_back(answer);
    }

    pub fn events(&self) -> Vec<PromptEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: PromptEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl GatePromptPort for ScriptedGatePrompt {
    async fn confirm(&self, prompt: &str) -> Result<String, GatePromptError> {
        self.record(PromptEvent::Confirm(prompt.to_string()));
        if self.never_answer {
            std::future::pending::<()>().await;
        }
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GatePromptError::Closed))
    }

    fn announce(&self, message: &str) {
        self.record(PromptEvent::Announce(message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.record(PromptEvent::Warn(message.to_string()));
    }

    fn countdown(&self, remaining_seconds: u64) {
        self.record(PromptEvent::Countdown(remaining_seconds));
    }

    fn countdown_finished(&self) {
        self.record(PromptEvent::CountdownFinished);
    }
}

/// Runner that records every argv instead of spawning processes
pub struct RecordingRunner {
    calls: Mutex<Vec<(Vec<String>, bool)>>,
    output: String,
    failure: Option<RunnerError>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            output: String::new(),
            failure: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    pub fn failing(mut self, failure: RunnerError) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Recorded `(argv, captured)` pairs
    pub fn calls(&self) -> Vec<(Vec<String>, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunnerPort for RecordingRunner {
    async fn execute(&self, argv: &[String]) -> Result<(), RunnerError> {
        self.calls.lock().unwrap().push((argv.to_vec(), false));
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn execute_with_output(&self, argv: &[String]) -> Result<String, RunnerError> {
        self.calls.lock().unwrap().push((argv.to_vec(), true));
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.output.clone()),
        }
    }

    fn describe(&self) -> String {
        "recording".to_string()
    }
}

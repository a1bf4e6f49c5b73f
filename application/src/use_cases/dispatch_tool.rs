//! Dispatch tool use case
//!
//! Turns a tool path plus parameter values into a running command.
//!
//! # Pipeline
//!
//! ```text
//! resolve ─▶ required ─▶ exclusions ─▶ gate (each level) ─▶ expand ─▶ run
//!    │          │            │               │                 │        │
//!    └──────────┴────────────┴─ DomainError  └─ Aborted        │        └─ RunnerError
//!                                                              └─ DomainError
//! ```
//!
//! Exclusion rules are checked before any gate runs, so an excluded value is
//! refused even when its level is configured as `force`.

use crate::ports::command_runner::{CommandRunnerPort, RunnerError};
use crate::use_cases::danger_gate::{DangerGate, GateError};
use operations_domain::core::string::truncate;
use operations_domain::{
    expand, DefaultParameterValidator, DomainError, GateOutcome, ParameterValidator,
    ParameterValues, ToolTree,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that end a dispatch
#[derive(Error, Debug)]
pub enum DispatchToolError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    /// Expansion produced no tokens
    #[error("empty command")]
    EmptyCommand,
}

/// Input for the dispatch use case
#[derive(Debug, Clone, Default)]
pub struct DispatchToolInput {
    /// `_`-joined tool path, e.g. `kubectl_get_pod`
    pub path: String,
    pub values: ParameterValues,
    /// Capture stdout instead of streaming it
    pub capture_output: bool,
    /// Stop after expansion; no gate, no execution
    pub dry_run: bool,
}

impl DispatchToolInput {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_values(mut self, values: ParameterValues) -> Self {
        self.values = values;
        self
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn with_capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// How a dispatch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The command ran; `output` is set in capture mode
    Executed {
        argv: Vec<String>,
        output: Option<String>,
    },
    /// Dry run: the command that would have run
    DryRun { argv: Vec<String> },
    /// The gate for `danger_level` was declined
    Aborted { danger_level: String },
}

/// Hand an expanded argv to the runner.
///
/// Returns the captured stdout in capture mode, `None` when streaming.
pub async fn run_command(
    argv: &[String],
    runner: &dyn CommandRunnerPort,
    capture: bool,
) -> Result<Option<String>, DispatchToolError> {
    if argv.is_empty() {
        return Err(DispatchToolError::EmptyCommand);
    }

    if capture {
        let output = runner.execute_with_output(argv).await?;
        debug!(output = %truncate(output.trim_end(), 200), "Captured command output");
        Ok(Some(output))
    } else {
        runner.execute(argv).await?;
        Ok(None)
    }
}

/// Use case for dispatching one tool invocation
pub struct DispatchToolUseCase {
    tree: Arc<ToolTree>,
    gate: DangerGate,
    runner: Arc<dyn CommandRunnerPort>,
    validator: Box<dyn ParameterValidator + Send + Sync>,
}

impl DispatchToolUseCase {
    pub fn new(tree: Arc<ToolTree>, gate: DangerGate, runner: Arc<dyn CommandRunnerPort>) -> Self {
        Self {
            tree,
            gate,
            runner,
            validator: Box::new(DefaultParameterValidator),
        }
    }

    pub async fn execute(
        &self,
        input: DispatchToolInput,
        cancel: &CancellationToken,
    ) -> Result<DispatchOutcome, DispatchToolError> {
        let resolved = self.tree.resolve(&input.path)?;
        debug!(
            path = %input.path,
            tokens = resolved.tokens.len(),
            params = resolved.params.len(),
            "Resolved tool path"
        );

        self.validator
            .validate_required(&resolved.params, &input.values)?;
        self.validator
            .validate_exclusions(&resolved.params, &input.values)?;
        debug!("Parameters validated");

        if !input.dry_run {
            for level in resolved.danger_levels_in_force(&input.values) {
                debug!(danger_level = %level, "Authorizing danger level");
                if self.gate.authorize(&level, cancel).await? == GateOutcome::Rejected {
                    info!(path = %input.path, danger_level = %level, "Operation aborted");
                    return Ok(DispatchOutcome::Aborted {
                        danger_level: level,
                    });
                }
            }
        }

        let argv = expand(&resolved.tokens, &input.values)?;

        if input.dry_run {
            debug!(argv = ?argv, "Dry run, not executing");
            return Ok(DispatchOutcome::DryRun { argv });
        }

        info!(
            runner = %self.runner.describe(),
            command = %argv.join(" "),
            "Executing command"
        );
        let output = run_command(&argv, self.runner.as_ref(), input.capture_output).await?;

        Ok(DispatchOutcome::Executed { argv, output })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{PromptEvent, RecordingRunner, ScriptedGatePrompt};
    use operations_domain::{
        DangerAction, DangerActions, DangerPolicy, ParameterSpec, ToolNode, ValidationRule,
    };
    use std::time::Duration;

    fn kubectl_tree() -> Arc<ToolTree> {
        let root = ToolNode::new("kubectl")
            .with_command(["kubectl"])
            .with_parameter(
                ParameterSpec::new("namespace", "Kubernetes namespace", true)
                    .with_rule(ValidationRule::new("high", ["kube-system"])),
            )
            .with_child(
                ToolNode::new("get pod").with_command(["get", "pod", "-n", "{{.namespace}}"]),
            )
            .with_child(
                ToolNode::new("delete pod")
                    .with_command(["delete", "pod", "{{.pod}}", "-n", "{{.namespace}}"])
                    .with_parameter(ParameterSpec::new("pod", "Pod name", true))
                    .with_danger_level("medium"),
            )
            .with_child(
                ToolNode::new("drain")
                    .with_command(["drain", "{{.node}}"])
                    .with_danger_level("nonexistent"),
            )
            .with_child(ToolNode::new("broken").with_command(["{{.namespace"]));
        let noop = ToolNode::new("noop");
        Arc::new(ToolTree::new(vec![root, noop]).unwrap())
    }

    struct Harness {
        use_case: DispatchToolUseCase,
        prompt: Arc<ScriptedGatePrompt>,
        runner: Arc<RecordingRunner>,
    }

    fn harness(prompt: ScriptedGatePrompt, runner: RecordingRunner) -> Harness {
        let actions = Arc::new(DangerActions::from_actions([
            DangerAction::new("high", DangerPolicy::Force { message: None }),
            DangerAction::new(
                "medium",
                DangerPolicy::Timeout {
                    message: None,
                    seconds: 2,
                },
            ),
        ]));
        let prompt = Arc::new(prompt);
        let runner = Arc::new(runner);
        let gate = DangerGate::new(actions, prompt.clone());
        Harness {
            use_case: DispatchToolUseCase::new(kubectl_tree(), gate, runner.clone()),
            prompt,
            runner,
        }
    }

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_round_trip_get_pod() {
        let h = harness(ScriptedGatePrompt::new(), RecordingRunner::new());
        let input = DispatchToolInput::new("kubectl_get_pod").with_value("namespace", "default");

        let outcome = h
            .use_case
            .execute(input, &CancellationToken::new())
            .await
            .unwrap();

        let expected = argv(&["kubectl", "get", "pod", "-n", "default"]);
        assert_eq!(
            outcome,
            DispatchOutcome::Executed {
                argv: expected.clone(),
                output: None
            }
        );
        assert_eq!(h.runner.calls(), vec![(expected, false)]);
    }

    #[tokio::test]
    async fn test_capture_output_returns_stdout() {
        let h = harness(
            ScriptedGatePrompt::new(),
            RecordingRunner::new().with_output("pod-1\n"),
        );
        let input = DispatchToolInput::new("kubectl_get_pod")
            .with_value("namespace", "default")
            .with_capture_output(true);

        let outcome = h
            .use_case
            .execute(input, &CancellationToken::new())
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            DispatchOutcome::Executed { output: Some(ref o), .. } if o == "pod-1\n"
        ));
        assert!(h.runner.calls()[0].1);
    }

    #[tokio::test]
    async fn test_missing_required_stops_before_gate() {
        let h = harness(ScriptedGatePrompt::new(), RecordingRunner::new());
        let input = DispatchToolInput::new("kubectl_delete_pod").with_value("namespace", "default");

        let err = h
            .use_case
            .execute(input, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DispatchToolError::Domain(DomainError::MissingRequiredParameter(ref p)) if p == "pod"
        ));
        assert!(h.prompt.events().is_empty());
        assert!(h.runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_excluded_value_is_vetoed_even_with_force() {
        let h = harness(ScriptedGatePrompt::new(), RecordingRunner::new());
        let input =
            DispatchToolInput::new("kubectl_get_pod").with_value("namespace", "kube-system");

        let err = h
            .use_case
            .execute(input, &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            DispatchToolError::Domain(DomainError::ExcludedValue {
                name,
                value,
                danger_level,
            }) => {
                assert_eq!(name, "namespace");
                assert_eq!(value, "kube-system");
                assert_eq!(danger_level, "high");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(h.prompt.events().is_empty());
        assert!(h.runner.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_parameter_and_tool_levels_are_both_gated() {
        let h = harness(ScriptedGatePrompt::new(), RecordingRunner::new());
        let input = DispatchToolInput::new("kubectl_delete_pod")
            .with_value("namespace", "default")
            .with_value("pod", "web-1");
        let start = tokio::time::Instant::now();

        let outcome = h
            .use_case
            .execute(input, &CancellationToken::new())
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_secs(2));
        assert_eq!(
            outcome,
            DispatchOutcome::Executed {
                argv: argv(&["kubectl", "delete", "pod", "web-1", "-n", "default"]),
                output: None
            }
        );

        let events = h.prompt.events();
        assert_eq!(
            events[0],
            PromptEvent::Announce("Warning: This operation has danger level high.".into())
        );
        assert!(matches!(&events[1], PromptEvent::Announce(m) if m.contains("danger level medium")));
    }

    #[tokio::test]
    async fn test_unknown_level_proceeds_with_warning() {
        let h = harness(ScriptedGatePrompt::new(), RecordingRunner::new());
        let input = DispatchToolInput::new("kubectl_drain")
            .with_value("namespace", "default")
            .with_value("node", "worker-3");

        let outcome = h
            .use_case
            .execute(input, &CancellationToken::new())
            .await
            .unwrap();

        assert!(matches!(outcome, DispatchOutcome::Executed { .. }));
        assert!(h
            .prompt
            .events()
            .iter()
            .any(|e| matches!(e, PromptEvent::Warn(m) if m.contains("nonexistent"))));
    }

    #[tokio::test]
    async fn test_declined_confirmation_aborts() {
        let tree = kubectl_tree();
        let actions = Arc::new(DangerActions::from_actions([DangerAction::new(
            "medium",
            DangerPolicy::Confirm { message: None },
        )]));
        let prompt = Arc::new(ScriptedGatePrompt::answering(&["n"]));
        let runner = Arc::new(RecordingRunner::new());
        let use_case = DispatchToolUseCase::new(
            tree,
            DangerGate::new(actions, prompt.clone()),
            runner.clone(),
        );

        let input = DispatchToolInput::new("kubectl_delete_pod")
            .with_value("namespace", "default")
            .with_value("pod", "web-1");
        let outcome = use_case
            .execute(input, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::Aborted {
                danger_level: "medium".into()
            }
        );
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_skips_gate_and_runner() {
        let h = harness(ScriptedGatePrompt::new(), RecordingRunner::new());
        let input = DispatchToolInput::new("kubectl_delete_pod")
            .with_value("namespace", "default")
            .with_value("pod", "web-1")
            .with_dry_run(true);

        let outcome = h
            .use_case
            .execute(input, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::DryRun {
                argv: argv(&["kubectl", "delete", "pod", "web-1", "-n", "default"])
            }
        );
        assert!(h.prompt.events().is_empty());
        assert!(h.runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_template_error_surfaces() {
        let h = harness(ScriptedGatePrompt::new(), RecordingRunner::new());
        let input = DispatchToolInput::new("kubectl_broken").with_value("namespace", "default");

        let err = h
            .use_case
            .execute(input, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchToolError::Domain(ref e) if e.is_template_error()));
        assert!(h.runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let h = harness(ScriptedGatePrompt::new(), RecordingRunner::new());
        let err = h
            .use_case
            .execute(DispatchToolInput::new("helm_install"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchToolError::Domain(DomainError::ToolNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_command_never_reaches_runner() {
        let h = harness(ScriptedGatePrompt::new(), RecordingRunner::new());
        let err = h
            .use_case
            .execute(DispatchToolInput::new("noop"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchToolError::EmptyCommand));
        assert!(h.runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_runner_failure_is_terminal() {
        let failure = RunnerError::Failed {
            status: "exit status: 1".into(),
            stderr: "boom".into(),
        };
        let h = harness(
            ScriptedGatePrompt::new(),
            RecordingRunner::new().failing(failure.clone()),
        );
        let input = DispatchToolInput::new("kubectl_get_pod").with_value("namespace", "default");

        let err = h
            .use_case
            .execute(input, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchToolError::Runner(ref e) if *e == failure));
        assert_eq!(h.runner.calls().len(), 1);
    }
}

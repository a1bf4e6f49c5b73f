//! CLI entrypoint for operations
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches};
use operations_application::{
    CommandRunnerPort, DangerGate, DispatchOutcome, DispatchToolInput, DispatchToolUseCase,
};
use operations_domain::{DangerActions, ToolTree};
use operations_infrastructure::{
    create_runner, Catalog, ConfigError, ConfigLoader, LoadedConfig, LocalCommandRunner,
    SshOverrides, SshSettings,
};
use operations_presentation::cli::commands::{config_path_from_args, verbosity_from_args};
use operations_presentation::output::listing;
use operations_presentation::{
    parse_raw_args, select_tool, tool_subcommands, Cli, Command, ConsoleFormatter, ListFormat,
    TerminalGatePrompt, ToolSelection,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::error(&format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Vec<String>) -> Result<ExitCode> {
    init_logging(verbosity_from_args(&args));

    // Tool subcommands come from the config, so load it before parsing
    let config_path = config_path_from_args(&args);
    let loaded = load_config(config_path.as_deref())?;
    let catalog = match &loaded {
        Some(loaded) => loaded
            .config
            .to_catalog()
            .with_context(|| format!("invalid tool configuration in {}", loaded.path.display()))?,
        None => Catalog {
            tree: ToolTree::empty(),
            actions: DangerActions::new(),
        },
    };

    let mut command = Cli::command().subcommands(tool_subcommands(&catalog.tree));
    let matches = match command.try_get_matches_from_mut(&args) {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            return Ok(if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            });
        }
    };
    let cli = Cli::from_arg_matches(&matches)?;

    match &loaded {
        Some(loaded) => info!(
            path = %loaded.path.display(),
            tools = catalog.tree.roots().len(),
            actions = catalog.actions.len(),
            "Loaded configuration"
        ),
        None => debug!("No configuration file found; no tools available"),
    }

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        if let Some(loaded) = &loaded {
            println!();
            println!(
                "Using {} ({} tools, {} danger actions)",
                loaded.path.display(),
                catalog.tree.roots().len(),
                catalog.actions.len()
            );
        }
        return Ok(ExitCode::SUCCESS);
    }

    let input = match &cli.command {
        Some(Command::List { verbose, format }) => {
            match format {
                ListFormat::Text => print!("{}", listing::render_text(&catalog.tree, *verbose)),
                ListFormat::Json => println!("{}", listing::render_json(&catalog.tree)?),
            }
            return Ok(ExitCode::SUCCESS);
        }
        Some(Command::Exec { tool_path, args }) => {
            let values = parse_raw_args(args).context("invalid tool arguments")?;
            DispatchToolInput::new(tool_path.clone()).with_values(values)
        }
        None => match select_tool(&catalog.tree, &matches) {
            Some(ToolSelection::Invoke { path, values }) => {
                DispatchToolInput::new(path).with_values(values)
            }
            Some(ToolSelection::Help(help)) => {
                print!("{}", help);
                return Ok(ExitCode::SUCCESS);
            }
            None => {
                command.print_help()?;
                return Ok(ExitCode::SUCCESS);
            }
        },
    };
    let input = input
        .with_capture_output(cli.capture)
        .with_dry_run(cli.dry_run);

    // === Dependency Injection ===
    let runner: Arc<dyn CommandRunnerPort> = if cli.dry_run {
        Arc::new(LocalCommandRunner::new())
    } else {
        let settings = ssh_settings(&cli, loaded.as_ref());
        create_runner(cli.remote, settings)
            .await
            .context("failed to set up command runner")?
    };
    info!(runner = %runner.describe(), "Command runner ready");

    let gate = DangerGate::new(
        Arc::new(catalog.actions),
        Arc::new(TerminalGatePrompt::new()),
    );
    let use_case = DispatchToolUseCase::new(Arc::new(catalog.tree), gate, Arc::clone(&runner));

    let cancel = CancellationToken::new();
    let ctrl_c = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let result = use_case.execute(input, &cancel).await;
    ctrl_c.abort();

    if let Err(e) = runner.close().await {
        warn!(error = %e, "Failed to close command runner");
    }

    let outcome = result?;
    if let Some(text) = ConsoleFormatter::outcome(&outcome) {
        print!("{}", text);
    }
    match outcome {
        DispatchOutcome::Aborted { danger_level } => {
            info!(danger_level = %danger_level, "Operation declined");
            eprintln!("{}", ConsoleFormatter::aborted());
            Ok(ExitCode::FAILURE)
        }
        DispatchOutcome::Executed { .. } | DispatchOutcome::DryRun { .. } => Ok(ExitCode::SUCCESS),
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// A missing config is only an error when one was named explicitly
fn load_config(config_path: Option<&Path>) -> Result<Option<LoadedConfig>> {
    match ConfigLoader::load(config_path) {
        Ok(loaded) => Ok(Some(loaded)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e).context("failed to load configuration"),
    }
}

/// Defaults, then the config file's `ssh:` section, then flags
fn ssh_settings(cli: &Cli, loaded: Option<&LoadedConfig>) -> SshSettings {
    let overrides = SshOverrides {
        host: cli.host.clone(),
        port: cli.port,
        user: cli.user.clone(),
        key: cli.key.clone(),
        verify_host: cli.verify_host,
        timeout_secs: cli.timeout,
    };
    SshSettings::from_file(loaded.and_then(|l| l.config.ssh.as_ref())).with_overrides(&overrides)
}

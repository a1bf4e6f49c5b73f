//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for `list`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Indented tree
    #[default]
    Text,
    /// The tool tree as JSON
    Json,
}

/// CLI arguments for operations
#[derive(Parser, Debug)]
#[command(name = "operations")]
#[command(version, about = "Run configured operations with danger-level gating")]
#[command(long_about = r#"
Operations runs commands declared in a configuration file. Each tool and
subtool becomes a subcommand whose flags are the tool's parameters:

  operations kubectl get_pod --namespace default
  operations exec kubectl_get_pod --namespace=default

Operations carrying a danger level are gated before they run (confirm,
countdown or warning), as configured under `actions:`.

Configuration files are loaded from (first match wins):
1. --config <path>               Explicit config file
2. ~/.operations/config.yaml     Home config
3. ./operations.yaml             Project config
4. ./config.yaml

Global options go before the subcommand.
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run commands on a remote host over ssh
    #[arg(long)]
    pub remote: bool,

    /// Remote host
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Remote user name
    #[arg(long, value_name = "USER")]
    pub user: Option<String>,

    /// Private key for the remote host
    #[arg(long, value_name = "PATH")]
    pub key: Option<String>,

    /// Remote ssh port
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Connection timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Verify the remote host key against known_hosts
    #[arg(long, value_name = "BOOL")]
    pub verify_host: Option<bool>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Capture command output and print it when the command finishes
    #[arg(long)]
    pub capture: bool,

    /// Print the command that would run without gating or running it
    #[arg(long)]
    pub dry_run: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Execute a tool by its full path, e.g. `kubectl_get_pod`
    #[command(long_about = "Execute a tool by its `_`-joined path.\n\n\
        Arguments are `--name=value`, `--name value`, `--flag` (true) or `name=value`.")]
    Exec {
        /// Tool path, e.g. `kubectl_get_pod`
        tool_path: String,

        /// Parameter arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List all available tools
    List {
        /// Show parameters of each subtool
        #[arg(short, long)]
        verbose: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: ListFormat,
    },
}

/// Names the built-in subcommands occupy
pub const RESERVED_COMMANDS: [&str; 3] = ["exec", "list", "help"];

/// Find `--config` in raw arguments before full parsing.
///
/// Tool subcommands are generated from the configuration, so the config path
/// has to be known before clap sees the arguments.
pub fn config_path_from_args<S: AsRef<str>>(args: &[S]) -> Option<PathBuf> {
    let mut iter = args.iter().map(AsRef::as_ref);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            return None;
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(path));
        }
        if arg == "--config" {
            return iter.next().map(PathBuf::from);
        }
    }
    None
}

/// Global options that take a value
const VALUE_OPTIONS: [&str; 7] = [
    "--config",
    "--host",
    "--user",
    "--key",
    "--port",
    "--timeout",
    "--verify-host",
];

/// Count `-v` flags in raw arguments before full parsing.
///
/// Logging is set up before the config is loaded, so its warnings are not
/// lost. Only options ahead of the subcommand count; `list -v` is not a
/// verbosity flag.
pub fn verbosity_from_args<S: AsRef<str>>(args: &[S]) -> u8 {
    let mut count: u8 = 0;
    let mut iter = args.iter().skip(1).map(AsRef::as_ref);
    while let Some(arg) = iter.next() {
        if arg == "--verbose" {
            count = count.saturating_add(1);
        } else if VALUE_OPTIONS.contains(&arg) {
            iter.next();
        } else if let Some(flags) = arg
            .strip_prefix('-')
            .filter(|f| !f.is_empty() && f.chars().all(|c| c == 'v'))
        {
            count = count.saturating_add(u8::try_from(flags.len()).unwrap_or(u8::MAX));
        } else if arg == "--" || !arg.starts_with('-') {
            break;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_exec_with_hyphen_args() {
        let cli = Cli::try_parse_from([
            "operations",
            "--dry-run",
            "exec",
            "kubectl_get_pod",
            "--namespace",
            "default",
            "--watch",
        ])
        .unwrap();
        assert!(cli.dry_run);
        assert_eq!(
            cli.command,
            Some(Command::Exec {
                tool_path: "kubectl_get_pod".into(),
                args: vec!["--namespace".into(), "default".into(), "--watch".into()],
            })
        );
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from(["operations", "-vv", "list", "-v", "--format", "json"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.command,
            Some(Command::List {
                verbose: true,
                format: ListFormat::Json
            })
        );
    }

    #[test]
    fn test_parse_remote_flags() {
        let cli = Cli::try_parse_from([
            "operations",
            "--remote",
            "--host",
            "example.com",
            "--port",
            "2222",
            "--verify-host",
            "false",
            "list",
        ])
        .unwrap();
        assert!(cli.remote);
        assert_eq!(cli.host.as_deref(), Some("example.com"));
        assert_eq!(cli.port, Some(2222));
        assert_eq!(cli.verify_host, Some(false));
    }

    #[test]
    fn test_verbosity_from_args() {
        assert_eq!(verbosity_from_args(&["operations", "list"]), 0);
        assert_eq!(verbosity_from_args(&["operations", "-vv", "list"]), 2);
        assert_eq!(
            verbosity_from_args(&["operations", "-v", "--config", "-v.yaml", "--verbose", "list"]),
            2
        );
        // `list -v` and tool flags after the subcommand are not verbosity
        assert_eq!(verbosity_from_args(&["operations", "list", "-v"]), 0);
        assert_eq!(
            verbosity_from_args(&["operations", "--dry-run", "exec", "tool", "-vvv"]),
            0
        );
    }

    #[test]
    fn test_verbosity_matches_full_parse() {
        let args = ["operations", "-v", "--host", "h", "-vv", "--capture", "list", "-v"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(verbosity_from_args(&args), cli.verbose);
    }

    #[test]
    fn test_config_path_from_args() {
        assert_eq!(
            config_path_from_args(&["operations", "--config", "ops.yaml", "list"]),
            Some(PathBuf::from("ops.yaml"))
        );
        assert_eq!(
            config_path_from_args(&["operations", "--config=/etc/ops.yaml"]),
            Some(PathBuf::from("/etc/ops.yaml"))
        );
        assert_eq!(config_path_from_args(&["operations", "list"]), None);
        assert_eq!(
            config_path_from_args(&["operations", "--", "--config", "x"]),
            None
        );
    }
}

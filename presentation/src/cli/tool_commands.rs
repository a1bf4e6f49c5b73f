//! Subcommands generated from the tool tree
//!
//! Every node becomes a clap subcommand named after its path segment
//! (`get pod` → `get_pod`). A node accepts a `--name` flag for each of its
//! own parameters and each parameter inherited from its ancestors:
//!
//! ```text
//! operations kubectl get_pod --namespace default
//!            │       │       └─ inherited from kubectl
//!            │       └─ subtool "get pod"
//!            └─ root tool
//! ```
//!
//! Flags are never marked required here; the dispatch pipeline reports
//! missing parameters so both `exec` and subcommands fail the same way.

use super::commands::RESERVED_COMMANDS;
use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use operations_domain::core::string::join_tool_path;
use operations_domain::{
    ParamType, ParameterSet, ParameterSpec, ParameterValues, ToolNode, ToolTree,
};
use tracing::warn;

/// What the generated subcommands selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolSelection {
    /// Run the tool at `path` with the given values
    Invoke {
        path: String,
        values: ParameterValues,
    },
    /// A node with subtools was selected without one of them; its help text
    Help(String),
}

/// Build one subcommand per root tool
pub fn tool_subcommands(tree: &ToolTree) -> Vec<Command> {
    tree.roots()
        .iter()
        .filter(|root| {
            let reserved = RESERVED_COMMANDS.contains(&root.normalized_name().as_str());
            if reserved {
                warn!(tool = %root.name, "Tool name clashes with a built-in command; use `exec` to run it");
            }
            !reserved
        })
        .map(|root| node_command(root, &ParameterSet::new()))
        .collect()
}

/// Map parsed matches back onto the tool tree.
///
/// Returns `None` when the selected subcommand is not a tool.
pub fn select_tool(tree: &ToolTree, matches: &ArgMatches) -> Option<ToolSelection> {
    let (root_name, mut node_matches) = matches.subcommand()?;
    if RESERVED_COMMANDS.contains(&root_name) {
        return None;
    }
    let mut node = tree.roots().iter().find(|r| r.normalized_name() == root_name)?;

    let mut path = node.name.clone();
    let mut bin_name = format!("operations {}", root_name);
    let mut inherited = ParameterSet::new();
    let mut values = ParameterValues::new();

    loop {
        let params = merged_params(&inherited, node);
        collect_values(node_matches, &params, &mut values);

        let Some((child_name, child_matches)) = node_matches.subcommand() else {
            if node.has_children() {
                let help = node_command(node, &inherited)
                    .bin_name(bin_name)
                    .render_help()
                    .to_string();
                return Some(ToolSelection::Help(help));
            }
            return Some(ToolSelection::Invoke { path, values });
        };

        let child = node
            .children
            .iter()
            .find(|c| c.normalized_name() == child_name)?;
        path = join_tool_path(&path, &child.name);
        bin_name = format!("{} {}", bin_name, child_name);
        inherited = params;
        node = child;
        node_matches = child_matches;
    }
}

fn merged_params(inherited: &ParameterSet, node: &ToolNode) -> ParameterSet {
    let mut params = inherited.clone();
    for (name, spec) in &node.params {
        params.insert(name.clone(), spec.clone());
    }
    params
}

fn node_command(node: &ToolNode, inherited: &ParameterSet) -> Command {
    let params = merged_params(inherited, node);

    let about = if node.description.is_empty() {
        format!("Execute {} command", node.name)
    } else {
        node.description.clone()
    };

    let mut cmd = Command::new(node.normalized_name()).about(about);
    for spec in params.values().filter(|p| is_flag_name(&p.name)) {
        cmd = cmd.arg(param_arg(spec));
    }
    for child in &node.children {
        if child.normalized_name() == "help" {
            warn!(tool = %child.name, "Subtool named `help` is only reachable through `exec`");
            continue;
        }
        cmd = cmd.subcommand(node_command(child, &params));
    }
    cmd
}

fn param_arg(spec: &ParameterSpec) -> Arg {
    let mut help = spec.description.clone();
    if spec.required {
        help.push_str(" (required)");
    }

    let arg = Arg::new(spec.name.clone())
        .long(spec.name.clone())
        .help(help);

    match spec.param_type {
        ParamType::Bool => arg.action(ArgAction::SetTrue),
        ParamType::Int => arg
            .value_name("INT")
            .value_parser(value_parser!(i64))
            .action(ArgAction::Set),
        ParamType::String => arg.value_name("VALUE").action(ArgAction::Set),
    }
}

/// Flags clap can carry: non-empty and not shadowing `--help`
fn is_flag_name(name: &str) -> bool {
    !name.is_empty() && name != "help" && !name.starts_with('-')
}

fn collect_values(matches: &ArgMatches, params: &ParameterSet, values: &mut ParameterValues) {
    for spec in params.values().filter(|p| is_flag_name(&p.name)) {
        if matches.value_source(&spec.name) != Some(ValueSource::CommandLine) {
            continue;
        }
        let value = match spec.param_type {
            ParamType::Bool => Some(matches.get_flag(&spec.name).to_string()),
            ParamType::Int => matches.get_one::<i64>(&spec.name).map(|v| v.to_string()),
            ParamType::String => matches.get_one::<String>(&spec.name).cloned(),
        };
        if let Some(value) = value {
            values.insert(spec.name.clone(), value);
        }
    }
}

//! `list` command rendering
//!
//! ```text
//! Available tools:
//!
//! kubectl
//!   └─ get pod (kubectl_get_pod)
//!   └─ rollout (kubectl_rollout)
//!     └─ restart (kubectl_rollout_restart)
//! ```

use colored::Colorize;
use operations_domain::{ToolEntry, ToolTree};

pub const NO_TOOLS_MESSAGE: &str =
    "No tools available. Please provide a valid configuration file.";

/// Indented tree of every tool, one blank line after each root.
///
/// `verbose` adds parameters and danger levels.
pub fn render_text(tree: &ToolTree, verbose: bool) -> String {
    if tree.is_empty() {
        return format!("{}\n", NO_TOOLS_MESSAGE);
    }

    let mut output = String::new();
    output.push_str(&format!("{}\n\n", "Available tools:".cyan().bold()));

    let entries = tree.entries();
    for (i, entry) in entries.iter().enumerate() {
        let indent = "  ".repeat(entry.depth);
        if entry.depth == 0 {
            output.push_str(&format!("{}", entry.node.name.bold()));
        } else {
            output.push_str(&format!("{}└─ {} ({})", indent, entry.node.name, entry.path));
        }
        if verbose {
            if let Some(level) = &entry.node.danger_level {
                output.push_str(&format!(" {}", format!("[danger: {}]", level).red()));
            }
        }
        output.push('\n');

        if verbose {
            render_parameters(&mut output, entry, &indent);
        }

        let root_done = entries.get(i + 1).is_none_or(|next| next.depth == 0);
        if root_done {
            output.push('\n');
        }
    }
    output
}

fn render_parameters(output: &mut String, entry: &ToolEntry<'_>, indent: &str) {
    if entry.node.params.is_empty() {
        return;
    }
    let param_indent = format!("{}     ", indent);
    output.push_str(&format!("{}Parameters:\n", param_indent));
    for param in entry.node.params.values() {
        let required = if param.required { " (required)" } else { "" };
        output.push_str(&format!(
            "{}  --{}{}: {}\n",
            param_indent, param.name, required, param.description
        ));
    }
}

/// The tool tree as pretty-printed JSON
pub fn render_json(tree: &ToolTree) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tree.roots())
}

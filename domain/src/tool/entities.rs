//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::core::error::DomainError;
use crate::core::string::{join_tool_path, normalize_tool_name, PATH_SEPARATOR};

/// Value type of a tool parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    String,
    Int,
    Bool,
}

impl ParamType {
    /// Map a configuration type name onto a parameter type.
    ///
    /// Unrecognized names fall back to [`ParamType::String`].
    pub fn from_type_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "int" | "integer" | "number" => ParamType::Int,
            "bool" | "boolean" => ParamType::Bool,
            _ => ParamType::String,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ParamType::String => "string",
            ParamType::Int => "int",
            ParamType::Bool => "bool",
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Values a parameter must never take while a danger level is attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    pub danger_level: String,
    pub excluded_values: BTreeSet<String>,
}

impl ValidationRule {
    pub fn new(
        danger_level: impl Into<String>,
        excluded_values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            danger_level: danger_level.into(),
            excluded_values: excluded_values.into_iter().map(Into::into).collect(),
        }
    }

    /// A rule without a danger level never excludes anything
    pub fn excludes(&self, value: &str) -> bool {
        !self.danger_level.is_empty() && self.excluded_values.contains(value)
    }
}

/// Parameter specification for a tool node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Parameter name, unique within the declaring node
    pub name: String,
    /// Parameter description
    pub description: String,
    pub param_type: ParamType,
    /// Whether a non-empty value must be supplied
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_rules: Vec<ValidationRule>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            param_type: ParamType::String,
            required,
            validation_rules: Vec::new(),
        }
    }

    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = param_type;
        self
    }

    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.validation_rules.push(rule);
        self
    }
}

/// Parameter set keyed by name, kept in name order
pub type ParameterSet = BTreeMap<String, ParameterSpec>;

/// A tool or subtool in the configured tree.
///
/// For root nodes `command` is the full command prefix (e.g. `["kubectl"]`);
/// for nested nodes it is the argument suffix appended after the ancestors'
/// tokens (e.g. `["get", "pod"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolNode {
    /// Display name; spaces are addressed as `_` in tool paths
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: ParameterSet,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ToolNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub danger_level: Option<String>,
}

impl ToolNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            command: Vec::new(),
            params: BTreeMap::new(),
            children: Vec::new(),
            danger_level: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_command(mut self, tokens: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.command = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parameter(mut self, param: ParameterSpec) -> Self {
        self.params.insert(param.name.clone(), param);
        self
    }

    pub fn with_child(mut self, child: ToolNode) -> Self {
        self.children.push(child);
        self
    }

    /// Attach a danger level; an empty string clears it
    pub fn with_danger_level(mut self, level: impl Into<String>) -> Self {
        let level = level.into();
        self.danger_level = if level.is_empty() { None } else { Some(level) };
        self
    }

    /// Name as addressed in a tool path
    pub fn normalized_name(&self) -> String {
        normalize_tool_name(&self.name)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// One node of a pre-order walk over the tree
#[derive(Debug, Clone)]
pub struct ToolEntry<'a> {
    /// Fully-qualified path, e.g. `kubectl_get_pod`
    pub path: String,
    /// 0 for roots
    pub depth: usize,
    pub node: &'a ToolNode,
}

/// The configured tool tree.
///
/// Built once from configuration and shared read-only for the rest of the
/// process. Construction checks that roots are addressable and that every
/// fully-qualified path is unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolTree {
    roots: Vec<ToolNode>,
}

impl ToolTree {
    pub fn new(roots: Vec<ToolNode>) -> Result<Self, DomainError> {
        for root in &roots {
            if root.name.is_empty() {
                return Err(DomainError::InvalidToolName {
                    name: root.name.clone(),
                    reason: "tool name cannot be empty".to_string(),
                });
            }
            if root.name.contains(PATH_SEPARATOR) || root.name.contains(' ') {
                return Err(DomainError::InvalidToolName {
                    name: root.name.clone(),
                    reason: "tool names cannot contain '_' or spaces".to_string(),
                });
            }
        }

        let tree = Self { roots };
        let mut seen = HashSet::new();
        for entry in tree.entries() {
            if !seen.insert(entry.path.clone()) {
                return Err(DomainError::DuplicateToolPath(entry.path));
            }
        }
        Ok(tree)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[ToolNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Find a root tool by exact name
    pub fn find_root(&self, name: &str) -> Option<&ToolNode> {
        self.roots.iter().find(|t| t.name == name)
    }

    /// Pre-order walk over every node with its qualified path
    pub fn entries(&self) -> Vec<ToolEntry<'_>> {
        fn walk<'a>(node: &'a ToolNode, path: String, depth: usize, out: &mut Vec<ToolEntry<'a>>) {
            for child in &node.children {
                let child_path = join_tool_path(&path, &child.name);
                out.push(ToolEntry {
                    path: child_path.clone(),
                    depth: depth + 1,
                    node: child,
                });
                walk(child, child_path, depth + 1, out);
            }
        }

        let mut out = Vec::new();
        for root in &self.roots {
            out.push(ToolEntry {
                path: root.name.clone(),
                depth: 0,
                node: root,
            });
            walk(root, root.name.clone(), 0, &mut out);
        }
        out
    }
}

/// Result of resolving a tool path: merged, not yet expanded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    /// Command template tokens, ancestors first
    pub tokens: Vec<String>,
    /// Union of ancestor and target parameters; deeper definitions win
    pub params: ParameterSet,
    pub danger_level: Option<String>,
}

impl ResolvedCommand {
    pub(crate) fn from_root(root: &ToolNode) -> Self {
        Self {
            tokens: root.command.clone(),
            params: root.params.clone(),
            danger_level: None,
        }
    }

    pub(crate) fn absorb(&mut self, node: &ToolNode) {
        for (name, param) in &node.params {
            self.params.insert(name.clone(), param.clone());
        }
        if let Some(level) = node.danger_level.as_ref().filter(|l| !l.is_empty()) {
            self.danger_level = Some(level.clone());
        }
        self.tokens.extend(node.command.iter().cloned());
    }

    /// Danger levels that must be authorized before this command runs.
    ///
    /// Rule levels of every supplied parameter come first (parameter name
    /// order, then rule order), followed by the command's own level.
    /// Duplicates and empty levels are dropped.
    pub fn danger_levels_in_force(&self, values: &BTreeMap<String, String>) -> Vec<String> {
        let mut levels: Vec<String> = Vec::new();
        let mut push = |level: &str| {
            if !level.is_empty() && !levels.iter().any(|l| l == level) {
                levels.push(level.to_string());
            }
        };

        for (name, param) in &self.params {
            if !values.contains_key(name) {
                continue;
            }
            for rule in &param.validation_rules {
                push(&rule.danger_level);
            }
        }
        if let Some(level) = &self.danger_level {
            push(level);
        }
        levels
    }
}

//! Raw configuration data types
//!
//! These structs represent the exact structure of the YAML (or TOML) config
//! file. They are deserialized directly, validated, and then converted into
//! the domain [`Catalog`].

mod actions;
mod ssh;
mod tools;

pub use actions::FileActionConfig;
pub use ssh::FileSshConfig;
pub use tools::{
    FileParameterConfig, FileParameters, FileSubtoolConfig, FileToolConfig, FileValidationConfig,
};

use operations_domain::{DangerActionKind, DangerActions, DomainError, ToolTree};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("action missing danger_level")]
    MissingDangerLevel,

    #[error("action for danger level {0} missing type")]
    MissingActionType(String),

    #[error("invalid action type: {0}")]
    InvalidActionType(String),

    #[error("timeout action for danger level {0} requires positive timeout value")]
    InvalidTimeout(String),

    #[error("tool missing name")]
    MissingToolName,

    #[error("tool {0} missing command")]
    MissingCommand(String),

    #[error("{0} has parameter with empty name")]
    EmptyParameterName(String),

    #[error("parameter {parameter} in {tool} missing type")]
    MissingParameterType { parameter: String, tool: String },

    #[error("subtool of {0} missing name")]
    MissingSubtoolName(String),

    #[error("danger level {0} is referenced but has no configured action")]
    UnconfiguredDangerLevel(String),
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Refuse danger levels that have no configured action
    pub strict_danger_levels: bool,
    pub actions: Vec<FileActionConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh: Option<FileSshConfig>,
    pub tools: Vec<FileToolConfig>,
}

/// Domain objects built from a validated configuration
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub tree: ToolTree,
    pub actions: DangerActions,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for action in &self.actions {
            if action.danger_level.is_empty() {
                return Err(ConfigValidationError::MissingDangerLevel);
            }
            if action.action_type.is_empty() {
                return Err(ConfigValidationError::MissingActionType(
                    action.danger_level.clone(),
                ));
            }
            let kind = action
                .action_type
                .parse::<DangerActionKind>()
                .map_err(|_| ConfigValidationError::InvalidActionType(action.action_type.clone()))?;
            if kind == DangerActionKind::Timeout && action.timeout <= 0 {
                return Err(ConfigValidationError::InvalidTimeout(
                    action.danger_level.clone(),
                ));
            }
        }

        for tool in &self.tools {
            if tool.name.is_empty() {
                return Err(ConfigValidationError::MissingToolName);
            }
            if tool.command.is_empty() {
                return Err(ConfigValidationError::MissingCommand(tool.name.clone()));
            }
            validate_params(&tool.params, &tool.name)?;
            for subtool in &tool.subtools {
                validate_subtool(subtool, &tool.name)?;
            }
        }

        if self.strict_danger_levels {
            let configured: BTreeSet<&str> = self
                .actions
                .iter()
                .map(|a| a.danger_level.as_str())
                .collect();
            if let Some(level) = self
                .referenced_danger_levels()
                .into_iter()
                .find(|level| !configured.contains(level.as_str()))
            {
                return Err(ConfigValidationError::UnconfiguredDangerLevel(level));
            }
        }

        Ok(())
    }

    /// Every non-empty danger level named by a subtool or a validation rule
    pub fn referenced_danger_levels(&self) -> BTreeSet<String> {
        fn from_params(params: &FileParameters, out: &mut BTreeSet<String>) {
            for param in params.values() {
                for rule in &param.validate {
                    if !rule.danger_level.is_empty() {
                        out.insert(rule.danger_level.clone());
                    }
                }
            }
        }

        fn from_subtool(subtool: &FileSubtoolConfig, out: &mut BTreeSet<String>) {
            if !subtool.danger_level.is_empty() {
                out.insert(subtool.danger_level.clone());
            }
            from_params(&subtool.params, out);
            for nested in &subtool.subtools {
                from_subtool(nested, out);
            }
        }

        let mut levels = BTreeSet::new();
        for tool in &self.tools {
            from_params(&tool.params, &mut levels);
            for subtool in &tool.subtools {
                from_subtool(subtool, &mut levels);
            }
        }
        levels
    }

    /// Build the tool tree and the danger action map
    pub fn to_catalog(&self) -> Result<Catalog, DomainError> {
        let actions = self
            .actions
            .iter()
            .map(FileActionConfig::to_domain)
            .collect::<Result<Vec<_>, _>>()?;
        let tree = ToolTree::new(self.tools.iter().map(FileToolConfig::to_domain).collect())?;

        Ok(Catalog {
            tree,
            actions: DangerActions::from_actions(actions),
        })
    }
}

fn validate_params(params: &FileParameters, owner: &str) -> Result<(), ConfigValidationError> {
    for (name, param) in params {
        if name.is_empty() {
            return Err(ConfigValidationError::EmptyParameterName(owner.to_string()));
        }
        if param.param_type.is_empty() {
            return Err(ConfigValidationError::MissingParameterType {
                parameter: name.clone(),
                tool: owner.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_subtool(
    subtool: &FileSubtoolConfig,
    parent: &str,
) -> Result<(), ConfigValidationError> {
    if subtool.name.is_empty() {
        return Err(ConfigValidationError::MissingSubtoolName(parent.to_string()));
    }

    let full_name = format!("{}_{}", parent, subtool.name);
    validate_params(&subtool.params, &full_name)?;
    for nested in &subtool.subtools {
        validate_subtool(nested, &full_name)?;
    }
    Ok(())
}

//! Tool tree configuration (`tools:` list)
//!
//! Root tools carry the command prefix, subtools carry the arguments that are
//! appended to it. Arguments may reference parameters with `{{.name}}`.
//!
//! ```yaml
//! tools:
//!   - name: kubectl
//!     command: [kubectl]
//!     params:
//!       namespace:
//!         description: The namespace to run the command in
//!         type: string
//!         required: true
//!         validate:
//!           - danger_level: high
//!             exclude: [kube-system, kube-public]
//!     subtools:
//!       - name: get pod
//!         args: [get, pod, -n, "{{.namespace}}"]
//!       - name: delete pod
//!         danger_level: high
//!         params:
//!           pod:
//!             type: string
//!             required: true
//!         args: [delete, pod, "{{.pod}}", -n, "{{.namespace}}"]
//! ```

use operations_domain::{ParamType, ParameterSpec, ToolNode, ValidationRule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Exclusion rule attached to a parameter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileValidationConfig {
    pub danger_level: String,
    pub exclude: Vec<String>,
}

/// Parameter definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileParameterConfig {
    pub description: String,
    /// `string`, `int`/`integer`/`number` or `bool`/`boolean`
    #[serde(rename = "type")]
    pub param_type: String,
    pub required: bool,
    pub validate: Vec<FileValidationConfig>,
}

impl FileParameterConfig {
    pub fn to_domain(&self, name: &str) -> ParameterSpec {
        let mut spec = ParameterSpec::new(name, self.description.clone(), self.required)
            .with_type(ParamType::from_type_name(&self.param_type));
        for rule in &self.validate {
            spec = spec.with_rule(ValidationRule::new(
                rule.danger_level.clone(),
                rule.exclude.iter().cloned(),
            ));
        }
        spec
    }
}

pub type FileParameters = BTreeMap<String, FileParameterConfig>;

/// Root tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolConfig {
    pub name: String,
    pub description: String,
    pub command: Vec<String>,
    pub params: FileParameters,
    pub subtools: Vec<FileSubtoolConfig>,
}

impl FileToolConfig {
    pub fn to_domain(&self) -> ToolNode {
        let mut node = ToolNode::new(self.name.clone())
            .with_description(self.description.clone())
            .with_command(self.command.iter().cloned());
        for (name, param) in &self.params {
            node = node.with_parameter(param.to_domain(name));
        }
        for subtool in &self.subtools {
            node = node.with_child(subtool.to_domain());
        }
        node
    }
}

/// Subtool; may nest further subtools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSubtoolConfig {
    pub name: String,
    pub description: String,
    pub args: Vec<String>,
    pub params: FileParameters,
    pub danger_level: String,
    pub subtools: Vec<FileSubtoolConfig>,
}

impl FileSubtoolConfig {
    pub fn to_domain(&self) -> ToolNode {
        let mut node = ToolNode::new(self.name.clone())
            .with_description(self.description.clone())
            .with_command(self.args.iter().cloned())
            .with_danger_level(self.danger_level.clone());
        for (name, param) in &self.params {
            node = node.with_parameter(param.to_domain(name));
        }
        for subtool in &self.subtools {
            node = node.with_child(subtool.to_domain());
        }
        node
    }
}

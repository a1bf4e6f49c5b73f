//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Every failure of resolution, validation, danger-action parsing and
/// template expansion surfaces as one of these variants. None of them is
/// retried; the invocation that produced it is over.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid tool path: {0:?}")]
    InvalidPath(String),

    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("subtool not found: {0}")]
    SubtoolNotFound(String),

    #[error("invalid tool name {name:?}: {reason}")]
    InvalidToolName { name: String, reason: String },

    #[error("duplicate tool path: {0}")]
    DuplicateToolPath(String),

    #[error("required parameter missing: {0}")]
    MissingRequiredParameter(String),

    #[error("parameter {name} with value {value} is excluded for danger level {danger_level}")]
    ExcludedValue {
        name: String,
        value: String,
        danger_level: String,
    },

    #[error("unknown action type: {0}")]
    UnknownActionType(String),

    #[error("timeout action for danger level {0} requires a positive timeout")]
    InvalidTimeout(String),

    #[error("error parsing template in argument {token:?}: {reason}")]
    TemplateSyntax { token: String, reason: String },

    #[error("error executing template in argument {token:?}: {reason}")]
    TemplateExecution { token: String, reason: String },
}

impl DomainError {
    /// Whether the error comes from the template expander
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            DomainError::TemplateSyntax { .. } | DomainError::TemplateExecution { .. }
        )
    }
}

//! Domain layer for operations
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tool tree
//!
//! Tools declared in configuration form a tree: a root owns the command
//! prefix, each subtool appends its own arguments and may add parameters
//! or a danger level. A tool is addressed by its `_`-joined path, e.g.
//! `kubectl_get_pod`.
//!
//! ## Danger gating
//!
//! Before a command runs, every danger level in force is authorized by the
//! action configured for it (confirm, timeout or force).

pub mod core;
pub mod danger;
pub mod tool;

// Re-export commonly used types
pub use core::error::DomainError;
pub use danger::{
    is_affirmative, DangerAction, DangerActionKind, DangerActions, DangerPolicy, GateOutcome,
    GateStep,
};
pub use tool::{
    expand, DefaultParameterValidator, ParamType, ParameterSet, ParameterSpec,
    ParameterValidator, ParameterValues, ResolvedCommand, ToolEntry, ToolNode, ToolTree,
    ValidationRule,
};

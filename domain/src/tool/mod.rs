//! Tool domain module
//!
//! This module defines the configured **tool tree** and the pure steps that
//! turn a tool path plus parameter values into a concrete argument vector.
//!
//! # Overview
//!
//! ```text
//! ┌──────────────┐ resolve ┌─────────────────┐ validate ┌──────────────┐ expand ┌──────────┐
//! │ ToolTree     │────────▶│ ResolvedCommand │─────────▶│ values OK    │───────▶│ argv     │
//! │ (config)     │  path   │ tokens + params │          │              │        │          │
//! └──────────────┘         └─────────────────┘          └──────────────┘        └──────────┘
//! ```
//!
//! - [`ToolTree::resolve`] walks the tree for a `_`-joined path and merges
//!   tokens, parameters and the danger level along the way
//! - [`ParameterValidator`] checks required parameters and exclusion rules
//! - [`template::expand`] substitutes `{{.name}}` placeholders
//!
//! Gating between validation and expansion lives in [`crate::danger`].

pub mod entities;
pub mod resolver;
pub mod template;
pub mod traits;

pub use entities::{
    ParamType, ParameterSet, ParameterSpec, ResolvedCommand, ToolEntry, ToolNode, ToolTree,
    ValidationRule,
};
pub use template::{expand, expand_token};
pub use traits::{DefaultParameterValidator, ParameterValidator, ParameterValues};

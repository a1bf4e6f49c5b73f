//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod danger_gate;
pub mod dispatch_tool;

//! Danger domain module
//!
//! A danger level is a free-form tag (`"high"`, `"prod"`, ...) attached to a
//! subtool or to a parameter validation rule. Configuration maps each level to
//! a [`DangerAction`] whose [`DangerPolicy`] decides how the gate behaves:
//!
//! | Policy | Behaviour | Outcome |
//! |--------|-----------|---------|
//! | `confirm` | Prompt, read one line | Approved on `y`/`yes`, otherwise Rejected |
//! | `timeout` | Announce, count down `seconds` | Always Approved |
//! | `force` | Announce | Always Approved |
//!
//! A level with no configured action is approved with a warning.
//!
//! Parameter exclusion rules are *not* part of the gate: they are checked by
//! the [`ParameterValidator`](crate::tool::ParameterValidator) beforehand and
//! veto the operation regardless of the policy.

pub mod entities;
pub mod gate;

pub use entities::{DangerAction, DangerActionKind, DangerActions, DangerPolicy};
pub use gate::{is_affirmative, GateOutcome, GateStep};

//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`] - domain-level errors
//! - [`string`] - small string helpers used by the tool tree

pub mod error;
pub mod string;

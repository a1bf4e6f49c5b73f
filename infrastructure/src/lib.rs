//! Infrastructure layer for operations
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod runner;

// Re-export commonly used types
pub use config::{
    Catalog, ConfigError, ConfigLoader, ConfigValidationError, FileConfig, FileSshConfig,
    LoadedConfig,
};
pub use runner::{
    create_runner, LocalCommandRunner, SshCommandRunner, SshOverrides, SshSettings,
};

//! Configuration file loading for operations
//!
//! This module handles discovery, parsing, validation and conversion of the
//! configuration file. Discovery order (first match wins):
//!
//! 1. `--config <path>` specified file
//! 2. Home: `~/.operations/config.yaml`
//! 3. Project: `./operations.yaml`, then `./config.yaml`
//!
//! `OPERATIONS_*` environment variables override values of the chosen file.

mod file_config;
mod loader;

pub use file_config::{
    Catalog, ConfigValidationError, FileActionConfig, FileConfig, FileParameterConfig,
    FileParameters, FileSshConfig, FileSubtoolConfig, FileToolConfig, FileValidationConfig,
};
pub use loader::{ConfigError, ConfigLoader, LoadedConfig, ENV_PREFIX};

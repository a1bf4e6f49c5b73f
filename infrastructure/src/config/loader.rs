//! Configuration file discovery and loading

use super::file_config::{ConfigValidationError, FileConfig};
use figment::{
    providers::{Env, Format, Toml, Yaml},
    Figment,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Project-level file names, checked in order
const PROJECT_CONFIG_FILES: [&str; 2] = ["operations.yaml", "config.yaml"];

/// Prefix of environment variables that override file values
pub const ENV_PREFIX: &str = "OPERATIONS_";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration file found (tried {})", display_paths(.0))]
    NotFound(Vec<PathBuf>),

    #[error("configuration file does not exist: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("error parsing config file: {0}")]
    Parse(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigValidationError),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A validated configuration and the file it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: FileConfig,
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Locate, parse and validate the configuration
    ///
    /// Discovery order:
    /// 1. Explicit config path (if provided)
    /// 2. Home: `~/.operations/config.yaml`
    /// 3. Project: `./operations.yaml`, then `./config.yaml`
    ///
    /// `OPERATIONS_*` environment variables override file values, with `__`
    /// separating nested keys (`OPERATIONS_SSH__HOST`).
    pub fn load(config_path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
        let path = Self::discover(config_path)?;
        let config = Self::load_file(&path)?;
        Ok(LoadedConfig { path, config })
    }

    /// Resolve which configuration file to use
    pub fn discover(config_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            return Ok(path.to_path_buf());
        }

        let candidates = Self::candidate_paths();
        match candidates.iter().find(|p| p.exists()) {
            Some(path) => {
                debug!(path = %path.display(), "Using configuration file");
                Ok(path.clone())
            }
            None => Err(ConfigError::NotFound(candidates)),
        }
    }

    /// Parse one file merged with environment overrides, then validate it
    pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let figment = if is_toml(path) {
            Figment::from(Toml::file(path))
        } else {
            Figment::from(Yaml::file(path))
        };

        let config: FileConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?;

        if config.ssh.as_ref().is_some_and(|ssh| ssh.password.is_some()) {
            warn!("ssh.password is ignored; only key-based authentication is supported");
        }

        config.validate()?;
        Ok(config)
    }

    /// Get the home-level config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|d| d.join(".operations").join("config.yaml"))
    }

    /// Every path discovery looks at, in priority order
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(global) = Self::global_config_path() {
            paths.push(global);
        }
        paths.extend(PROJECT_CONFIG_FILES.iter().map(PathBuf::from));
        paths
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        let mut selected = config_path.is_some_and(Path::exists);
        for path in Self::candidate_paths() {
            let mark = if path.exists() && !selected {
                selected = true;
                "FOUND"
            } else if path.exists() {
                "skip "
            } else {
                "     "
            };
            println!("  [{}] {}", mark, path.display());
        }

        println!("  [     ] Environment: {}*", ENV_PREFIX);
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"))
}

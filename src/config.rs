/// Configuration loading and merging
///
/// Precedence: CLI flags > environment variables (handled by clap) > config
/// file > built-in defaults. The merged [`Settings`] value is built once per
/// invocation and passed down explicitly.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::build::DEFAULT_TOOLCHAIN;
use crate::cli::Cli;
use crate::error::GrunError;
use crate::xdg;

/// Log level used when neither RUST_LOG nor --verbose say otherwise
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// grun configuration (loaded from TOML file)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GrunConfig {
    /// Cache directory for compiled binaries
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Compiler program (default: "go")
    #[serde(default)]
    pub toolchain: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[serde(default)]
    pub log_level: Option<String>,
}

impl GrunConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: GrunConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }
}

/// Load the config file
///
/// An explicitly given file must exist. The default location is used only
/// when a file is present there.
pub fn load(explicit: Option<&Path>) -> Result<Option<GrunConfig>, GrunError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match xdg::config_file() {
            Some(path) if path.is_file() => path,
            _ => return Ok(None),
        },
    };

    GrunConfig::from_file(&path)
        .map(Some)
        .map_err(|e| GrunError::Config {
            path,
            message: format!("{:#}", e),
        })
}

/// Effective settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub cache_dir: PathBuf,
    pub toolchain: String,
    pub log_level: String,
}

impl Settings {
    /// Merge CLI arguments with the config file
    pub fn merge(cli: &Cli, file_config: Option<GrunConfig>) -> Self {
        let file = file_config.unwrap_or_default();

        let cache_dir = non_empty_path(cli.cache_dir.clone())
            .or_else(|| non_empty_path(file.cache_dir))
            .unwrap_or_else(xdg::default_cache_dir);

        let toolchain = non_empty(cli.toolchain.clone())
            .or_else(|| non_empty(file.toolchain))
            .unwrap_or_else(|| DEFAULT_TOOLCHAIN.to_string());

        let log_level = if cli.verbose {
            "debug".to_string()
        } else {
            non_empty(file.log_level).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
        };

        Self {
            cache_dir,
            toolchain,
            log_level,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn non_empty_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|v| !v.as_os_str().is_empty())
}

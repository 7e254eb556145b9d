//! Default locations for grun's files
//!
//! - Cache: `$HOME/.cache/grun/`, or `.cache/grun` relative to the working
//!   directory when the home directory is unknown
//! - Config: `$XDG_CONFIG_HOME/grun/config.toml` (default:
//!   `~/.config/grun/config.toml`)

use std::path::PathBuf;

/// Cache location relative to the home directory
pub const DEFAULT_CACHE_DIR: &str = ".cache/grun";

/// Get the default cache directory for compiled binaries
pub fn default_cache_dir() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        home.join(DEFAULT_CACHE_DIR)
    } else {
        // Fallback to current directory if we can't get home directory
        PathBuf::from(DEFAULT_CACHE_DIR)
    }
}

/// Get the default config file path
///
/// Respects XDG_CONFIG_HOME environment variable.
pub fn config_file() -> Option<PathBuf> {
    let dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config)
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config")
    } else {
        return None;
    };

    Some(dir.join("grun").join("config.toml"))
}

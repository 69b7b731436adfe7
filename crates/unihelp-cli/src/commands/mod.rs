//! CLI command implementations.

pub mod config;
pub mod export;
pub mod inspect;
pub mod process;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use unihelp_config::{AppPaths, Config, ConfigError};

/// Get the application paths.
pub fn get_paths() -> Result<AppPaths> {
    AppPaths::new().context("Failed to determine application directories")
}

/// The config file in use: the explicit one, else the platform default.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(get_paths()?.config_file),
    }
}

/// Load configuration.
///
/// An explicit file must exist. The platform default may be absent, in
/// which case built-in defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Config::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        None => match Config::load() {
            Ok(config) => Ok(config),
            Err(ConfigError::NoConfigDir) => Ok(Config::default()),
            Err(e) => Err(e).context("Failed to load config"),
        },
    }
}

/// Shorten text to at most `max` characters for previews.
pub fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

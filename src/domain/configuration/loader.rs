//! Configuration file resolution and parsing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppConfig, AppError};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LEARNPATH_CONFIG";
/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "learnpath.toml";

/// Pick the config file to read.
///
/// An explicit path wins, then `LEARNPATH_CONFIG`, then `learnpath.toml` in
/// `cwd` when it exists. `None` means built-in defaults.
pub fn resolve_config_path(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    let local = cwd.join(DEFAULT_CONFIG_FILE);
    local.is_file().then_some(local)
}

/// Load and validate configuration, falling back to defaults.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<AppConfig, AppError> {
    let Some(path) = resolve_config_path(explicit, cwd) else {
        return Ok(AppConfig::default());
    };

    let content = fs::read_to_string(&path).map_err(|err| {
        AppError::config_error(format!("Failed to read config {}: {}", path.display(), err))
    })?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

//! Configuration file discovery and loading.

use crate::config::schema::AppConfig;
use crate::error::{EvfieldError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Project config location relative to the working directory.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".evfield").join("config.yml")
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EvfieldError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EvfieldError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into an [`AppConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<AppConfig> {
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| EvfieldError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit path must exist. Otherwise `.evfield/config.yml` under
/// `project_root` is used when present, and the defaults when not.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = config_override {
        return load_config_file(path);
    }

    let path = project_config_path(project_root);
    if path.exists() {
        tracing::debug!("Loading config from {}", path.display());
        load_config_file(&path)
    } else {
        Ok(AppConfig::default())
    }
}

//! Configuration loading and validation for evfield.
//!
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//! - Environment and flag overrides in [`layers`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use evfield::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".evfield");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "timeout_secs: 5").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.timeout_secs, 5);
//! ```

pub mod layers;
pub mod loader;
pub mod schema;
pub mod validator;

pub use layers::{apply_env, apply_process_env, FlagOverrides, DRAFT_DIR_ENV, SERVICE_URL_ENV};
pub use loader::{load_config, load_config_file, parse_config, project_config_path};
pub use schema::AppConfig;
pub use validator::validate;

use std::path::Path;

use crate::error::Result;

/// Load, layer and validate the configuration.
///
/// File values are overridden by the process environment, then by `flags`.
pub fn resolve_config(
    project_root: &Path,
    config_override: Option<&Path>,
    flags: &FlagOverrides,
) -> Result<AppConfig> {
    let mut config = load_config(project_root, config_override)?;
    apply_process_env(&mut config);
    flags.apply(&mut config);
    validate(&config)?;
    Ok(config)
}

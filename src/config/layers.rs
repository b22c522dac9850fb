//! Environment and command-line overrides.
//!
//! Settings are layered lowest to highest: config file, environment
//! variables, command-line flags.

use std::path::PathBuf;

use crate::config::schema::AppConfig;
use crate::ui::OutputMode;

/// Environment variable overriding `service_url`.
pub const SERVICE_URL_ENV: &str = "EVFIELD_SERVICE_URL";

/// Environment variable overriding `draft_dir`.
pub const DRAFT_DIR_ENV: &str = "EVFIELD_DRAFT_DIR";

/// Apply environment overrides read through `lookup`.
///
/// Empty values are ignored.
pub fn apply_env<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(url) = non_empty(SERVICE_URL_ENV) {
        tracing::debug!("{} overrides service_url", SERVICE_URL_ENV);
        config.service_url = Some(url);
    }
    if let Some(dir) = non_empty(DRAFT_DIR_ENV) {
        tracing::debug!("{} overrides draft_dir", DRAFT_DIR_ENV);
        config.draft_dir = Some(PathBuf::from(dir));
    }
}

/// Apply overrides from the process environment.
pub fn apply_process_env(config: &mut AppConfig) {
    apply_env(config, |name| std::env::var(name).ok());
}

/// Settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct FlagOverrides {
    pub service_url: Option<String>,
    pub draft_dir: Option<PathBuf>,
    pub output: Option<OutputMode>,
}

impl FlagOverrides {
    /// Apply the flags that were given.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(url) = &self.service_url {
            config.service_url = Some(url.clone());
        }
        if let Some(dir) = &self.draft_dir {
            config.draft_dir = Some(dir.clone());
        }
        if let Some(output) = self.output {
            config.output = Some(output);
        }
    }
}

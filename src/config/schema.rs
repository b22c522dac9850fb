//! Configuration schema for evfield.
//!
//! Maps to the YAML configuration file format:
//!
//! ```yaml
//! service_url: https://collector.example.com/api
//! timeout_secs: 15
//! draft_dir: /var/tmp/evfield
//! output: quiet
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::service::DEFAULT_TIMEOUT;
use crate::store::default_draft_dir;
use crate::ui::OutputMode;

/// Root configuration structure for `.evfield/config.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Base URL of the event field service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Directory holding form drafts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_dir: Option<PathBuf>,

    /// Default output mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputMode>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            draft_dir: None,
            output: None,
        }
    }
}

impl AppConfig {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Draft directory, falling back to the per-session temp location.
    pub fn draft_dir(&self) -> PathBuf {
        self.draft_dir.clone().unwrap_or_else(default_draft_dir)
    }

    /// Output mode, defaulting to normal.
    pub fn output_mode(&self) -> OutputMode {
        self.output.unwrap_or_default()
    }
}

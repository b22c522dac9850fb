//! The `evfield new` and `evfield edit` commands.
//!
//! Both open the interactive editor screen. Drafts are kept in the
//! configured draft directory and uniqueness is checked against the
//! configured service.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::editor::{run_screen, EditorMode, EventFieldEditor, ScreenOutcome};
use crate::error::{EvfieldError, Result};
use crate::service::{EventFieldService, HttpEventFieldService};
use crate::store::{FileStore, SessionStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The editor command implementation.
pub struct EditCommand {
    config: AppConfig,
    mode: EditorMode,
}

impl EditCommand {
    /// Create a new editor command.
    pub fn new(config: &AppConfig, mode: EditorMode) -> Self {
        Self {
            config: config.clone(),
            mode,
        }
    }

    /// Get the editor mode.
    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }
}

/// Build the HTTP service from the configuration.
pub(super) fn connect(config: &AppConfig) -> Result<HttpEventFieldService> {
    let url = config
        .service_url
        .as_deref()
        .ok_or_else(|| EvfieldError::ConfigValidationError {
            message: "service_url is not set (use --service-url, EVFIELD_SERVICE_URL or the config file)"
                .to_string(),
        })?;
    Ok(HttpEventFieldService::with_timeout(url, config.timeout())?)
}

impl Command for EditCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !ui.is_interactive() {
            ui.error("The editor needs an interactive terminal");
            return Ok(CommandResult::failure(2));
        }

        let service: Arc<dyn EventFieldService> = Arc::new(connect(&self.config)?);
        let store: Arc<dyn SessionStore> = Arc::new(FileStore::new(self.config.draft_dir()));
        let mut editor = EventFieldEditor::new(self.mode.clone(), service, store)?;

        match run_screen(&mut editor, ui)? {
            ScreenOutcome::Saved | ScreenOutcome::Quit => Ok(CommandResult::success()),
        }
    }
}

//! The `evfield validate` command.
//!
//! Runs the event field rules over a record stored as JSON, optionally
//! against a saved baseline, and reports every error found.

use anyhow::Context;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::cli::args::ValidateArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::model::{EventField, EventFieldValidator};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::edit::connect;

/// The validate command implementation.
pub struct ValidateCommand {
    config: AppConfig,
    args: ValidateArgs,
}

impl ValidateCommand {
    /// Create a new validate command.
    pub fn new(config: &AppConfig, args: ValidateArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }

    fn validator(&self) -> Result<EventFieldValidator> {
        if self.args.offline {
            return Ok(EventFieldValidator::offline());
        }
        Ok(EventFieldValidator::new(Arc::new(connect(&self.config)?)))
    }
}

/// Read an event field from a JSON file.
pub fn read_record(path: &Path) -> Result<EventField> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let record = serde_json::from_str(&content)
        .with_context(|| format!("{} is not an event field", path.display()))?;
    Ok(record)
}

impl Command for ValidateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let values = read_record(&self.args.file)?;
        let initial = match &self.args.baseline {
            Some(path) => read_record(path)?,
            None => EventField::default(),
        };

        let validator = self.validator()?;
        if validator.is_offline() {
            ui.warning("Uniqueness of FieldName and ShortDescription not checked (offline)");
        }
        let errors = validator.validate(&values, &initial);

        if errors.is_empty() {
            ui.success(&format!("{} is valid", self.args.file.display()));
            return Ok(CommandResult::success());
        }

        for (field, message) in errors.iter() {
            ui.error(&format!("{}: {}", field, message));
        }
        tracing::debug!("{} validation errors", errors.len());
        Ok(CommandResult::failure(1))
    }
}

//! The `evfield draft` command.
//!
//! Shows what the draft store holds for a form key: the in-progress draft
//! and the saved baseline it is compared against.

use crate::cli::args::DraftArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::store::{DraftEnvelope, FileStore, SessionStore, StoreKeys};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The draft command implementation.
pub struct DraftCommand {
    config: AppConfig,
    args: DraftArgs,
}

impl DraftCommand {
    /// Create a new draft command.
    pub fn new(config: &AppConfig, args: DraftArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }

    fn show_slot(
        &self,
        store: &dyn SessionStore,
        label: &str,
        slot: &str,
        ui: &mut dyn UserInterface,
    ) -> Result<bool> {
        let Some(raw) = store.get(slot)? else {
            ui.message(&format!("{}: none", label));
            return Ok(false);
        };

        match serde_json::from_str::<DraftEnvelope>(&raw) {
            Ok(envelope) => {
                let record = serde_json::to_string_pretty(&envelope.record)
                    .unwrap_or_else(|_| envelope.record.to_string());
                ui.message(&format!(
                    "{} (record version {}, saved {}):",
                    label,
                    envelope.record_version,
                    envelope.saved_at.to_rfc3339()
                ));
                ui.message(&record);
            }
            Err(e) => ui.warning(&format!("{}: unreadable ({})", label, e)),
        }
        Ok(true)
    }
}

impl Command for DraftCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = FileStore::new(self.config.draft_dir());
        let keys = StoreKeys::for_form(&self.args.key);

        ui.show_header(&format!("Form '{}'", self.args.key));
        let has_draft = self.show_slot(&store, "Draft", &keys.draft, ui)?;
        self.show_slot(&store, "Baseline", &keys.initial, ui)?;

        if !has_draft {
            return Ok(CommandResult::failure(1));
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventField;
    use crate::store::envelope;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn command(temp: &TempDir) -> DraftCommand {
        let config = AppConfig {
            draft_dir: Some(temp.path().to_path_buf()),
            ..AppConfig::default()
        };
        DraftCommand::new(&config, DraftArgs::default())
    }

    #[test]
    fn empty_store_reports_no_draft() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = command(&temp).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_message("Draft: none"));
        assert!(ui.has_message("Baseline: none"));
    }

    #[test]
    fn shows_stored_slots() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        let keys = StoreKeys::for_form("event-field-new");
        let draft = envelope::encode(&EventField::named("PortNumber"), 1).unwrap();
        let initial = envelope::encode(&EventField::default(), 1).unwrap();
        store.set(&keys.draft, &draft).unwrap();
        store.set(&keys.initial, &initial).unwrap();
        let mut ui = MockUI::new();

        let result = command(&temp).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("Draft (record version 1"));
        assert!(ui.has_message("PortNumber"));
        assert!(ui.has_message("Baseline (record version 1"));
    }

    #[test]
    fn unreadable_slot_is_warning() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        store
            .set(&StoreKeys::for_form("event-field-new").draft, "not json")
            .unwrap();
        let mut ui = MockUI::new();

        command(&temp).execute(&mut ui).unwrap();

        assert!(ui.has_warning("Draft: unreadable"));
    }
}

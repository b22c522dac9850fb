//! The event field editor.
//!
//! Binds a [`FormEngine`] over [`EventField`] to the event field service:
//! edits are kept as a draft under a form key derived from the record being
//! edited, validation asks the service about uniqueness, and submitting
//! creates or updates the record depending on the [`EditorMode`].

mod screen;

pub use screen::{run_screen, ScreenOutcome};

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::Result;
use crate::form::{FormConfig, FormEngine, SubmitOutcome};
use crate::model::{EventField, EventFieldValidator};
use crate::service::{EventFieldService, ServiceError};
use crate::store::SessionStore;

/// Prefix of every event field editor's form key.
pub const EVENT_FIELD_FORM_KEY: &str = "event-field";

/// Form key of the editor creating a new event field.
pub const NEW_EVENT_FIELD_FORM_KEY: &str = "event-field-new";

/// Notice shown after a successful save.
pub const CHANGES_SAVED: &str = "Changes saved";

/// Notice shown when a save fails without an explanation from the service.
pub const ERROR_OCCURRED: &str = "An error occurred";

/// Whether the editor creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { id: String },
}

impl EditorMode {
    /// Screen title for this mode.
    pub fn title(&self) -> &'static str {
        match self {
            EditorMode::Create => "New event field",
            EditorMode::Edit { .. } => "Setting event field",
        }
    }

    /// Form key holding this mode's draft.
    ///
    /// Each edited record gets its own key so a draft is only ever restored
    /// into the record it was made for.
    pub fn form_key(&self) -> String {
        match self {
            EditorMode::Create => NEW_EVENT_FIELD_FORM_KEY.to_string(),
            EditorMode::Edit { id } => format!("{}-{}", EVENT_FIELD_FORM_KEY, id),
        }
    }
}

/// A message for the user produced by a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    /// Text of the notice.
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Error(text) => text,
        }
    }
}

/// Create/edit controller for a single event field.
pub struct EventFieldEditor {
    mode: EditorMode,
    service: Arc<dyn EventFieldService>,
    form: FormEngine<EventField>,
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl EventFieldEditor {
    /// Create an editor that checks uniqueness against `service`.
    pub fn new(
        mode: EditorMode,
        service: Arc<dyn EventFieldService>,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self> {
        let validator = EventFieldValidator::new(service.clone());
        Self::with_validator(mode, service, store, validator)
    }

    /// Create an editor with a custom validator.
    pub fn with_validator(
        mode: EditorMode,
        service: Arc<dyn EventFieldService>,
        store: Arc<dyn SessionStore>,
        validator: EventFieldValidator,
    ) -> Result<Self> {
        let notices = Rc::new(RefCell::new(Vec::new()));

        let submit_service = service.clone();
        let submit_mode = mode.clone();
        let saved = notices.clone();
        let failed = notices.clone();

        let config = FormConfig::new()
            .key(mode.form_key())
            .initial_values(EventField::default())
            .on_validate(validator)
            .on_submit(
                move |values: &EventField, _: &EventField| -> anyhow::Result<Option<EventField>> {
                    match &submit_mode {
                        EditorMode::Edit { id } => submit_service.update(id, values)?,
                        EditorMode::Create => submit_service.create(values)?,
                    }
                    saved
                        .borrow_mut()
                        .push(Notice::Success(CHANGES_SAVED.to_string()));
                    Ok(Some(values.clone()))
                },
            )
            .on_error(move |e| {
                let text = e
                    .downcast_ref::<ServiceError>()
                    .and_then(ServiceError::synopsis)
                    .unwrap_or(ERROR_OCCURRED);
                tracing::warn!("Saving event field failed: {:#}", e);
                failed.borrow_mut().push(Notice::Error(text.to_string()));
            });

        let form = FormEngine::mount(config, store)?;

        Ok(Self {
            mode,
            service,
            form,
            notices,
        })
    }

    /// Get the editor mode.
    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    /// Screen title.
    pub fn title(&self) -> &'static str {
        self.mode.title()
    }

    /// Get the underlying form.
    pub fn form(&self) -> &FormEngine<EventField> {
        &self.form
    }

    /// Get the underlying form for input handling.
    pub fn form_mut(&mut self) -> &mut FormEngine<EventField> {
        &mut self.form
    }

    /// Fetch the record being edited.
    ///
    /// In edit mode, unless a draft was restored, the fetched record becomes
    /// both the baseline and the working values. Returns whether a record
    /// was applied.
    pub fn load(&mut self) -> Result<bool> {
        let EditorMode::Edit { id } = &self.mode else {
            return Ok(false);
        };
        if self.form.is_restored() {
            tracing::debug!("Keeping restored draft for event field {}", id);
            return Ok(false);
        }

        match self.service.get(id)? {
            Some(record) => {
                self.form.set_initial_values(record.clone())?;
                self.form.set_values(record, None)?;
                Ok(true)
            }
            None => {
                tracing::warn!("Event field {} not found", id);
                Ok(false)
            }
        }
    }

    /// Validate and save the working values.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        self.form.handle_submit()
    }

    /// Take the notices produced since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.borrow_mut())
    }
}

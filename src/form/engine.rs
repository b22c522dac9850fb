//! The form-state engine.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{EvfieldError, Result};
use crate::store::{envelope, SessionStore, StoreKeys};

use super::clean::same_after_clean;
use super::config::{ErrorHandler, FormConfig, FormSubmitter, FormValidator};
use super::path::{get_path, set_path};
use super::{FieldErrors, SubmitOutcome, SubmitTicket, TouchedFields, ValidationTicket};

/// Working state of a form.
#[derive(Debug, Clone)]
pub struct FormState<M> {
    /// Current, possibly unsaved, record.
    pub values: M,
    /// Fields the user has interacted with.
    pub touched: TouchedFields,
    /// Result of the latest applied validation run.
    pub errors: FieldErrors,
    /// Whether the latest applied validation run found no errors.
    pub is_valid: bool,
    /// Whether the values were restored from a stored draft.
    pub is_restored: bool,
}

/// Form controller for records of type `M` with draft persistence.
///
/// The engine keeps two records: the working `values` and the `initial`
/// baseline they are compared against. With a non-empty key both are
/// mirrored into the session store, so remounting the form with the same key
/// restores an in-progress edit together with the baseline it started from.
pub struct FormEngine<M> {
    key: String,
    keys: StoreKeys,
    record_version: u32,
    validate_on_change: bool,
    validate_on_blur: bool,
    store: Arc<dyn SessionStore>,
    validator: Option<Box<dyn FormValidator<M>>>,
    submitter: Option<Box<dyn FormSubmitter<M>>>,
    on_error: Option<ErrorHandler>,
    state: FormState<M>,
    initial: M,
    validation_seq: u64,
    submit_seq: u64,
    pending_submit: Option<u64>,
}

impl<M> FormEngine<M>
where
    M: Serialize + DeserializeOwned + Clone,
{
    /// Mount a form, restoring any stored draft for its key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the initial slots
    /// cannot be written. Stored slots that are malformed or were written
    /// for another record version are discarded, not reported.
    pub fn mount(config: FormConfig<M>, store: Arc<dyn SessionStore>) -> Result<Self> {
        let FormConfig {
            key,
            initial_values,
            record_version,
            validate_on_change,
            validate_on_blur,
            validator,
            submitter,
            on_error,
        } = config;

        let keys = StoreKeys::for_form(&key);
        let persists = !key.is_empty();

        let (stored_initial, stored_values) = if persists {
            (
                read_slot::<M>(store.as_ref(), &keys.initial, record_version)?,
                read_slot::<M>(store.as_ref(), &keys.draft, record_version)?,
            )
        } else {
            (None, None)
        };

        let baseline_stored = stored_initial.is_some();
        let is_restored = stored_values.is_some();
        let initial = stored_initial.unwrap_or(initial_values);
        let values = stored_values.unwrap_or_else(|| initial.clone());

        let engine = Self {
            key,
            keys,
            record_version,
            validate_on_change,
            validate_on_blur,
            store,
            validator,
            submitter,
            on_error,
            state: FormState {
                values,
                touched: TouchedFields::new(),
                errors: FieldErrors::new(),
                is_valid: true,
                is_restored,
            },
            initial,
            validation_seq: 0,
            submit_seq: 0,
            pending_submit: None,
        };

        if persists {
            if !baseline_stored {
                engine.write_slot(&engine.keys.initial, &engine.initial)?;
            }
            engine.persist_values()?;
        }

        tracing::debug!(
            "Mounted form '{}' (restored: {}, persisted: {})",
            engine.key,
            is_restored,
            persists
        );

        Ok(engine)
    }

    // --- Read access ---

    /// Get the persistence key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Check if the form mirrors its state into the session store.
    pub fn persists(&self) -> bool {
        !self.key.is_empty()
    }

    /// Get the full working state.
    pub fn state(&self) -> &FormState<M> {
        &self.state
    }

    /// Get the working values.
    pub fn values(&self) -> &M {
        &self.state.values
    }

    /// Get the baseline snapshot.
    pub fn initial_values(&self) -> &M {
        &self.initial
    }

    /// Get the current validation errors.
    pub fn errors(&self) -> &FieldErrors {
        &self.state.errors
    }

    /// Get the touched flags.
    pub fn touched(&self) -> &TouchedFields {
        &self.state.touched
    }

    /// Check if the values came from a stored draft (the status flag).
    pub fn is_restored(&self) -> bool {
        self.state.is_restored
    }

    /// Check if the latest validation run found no errors.
    pub fn is_valid(&self) -> bool {
        self.state.is_valid
    }

    /// Check if the values differ from the baseline after cleaning.
    pub fn is_dirty(&self) -> bool {
        match (
            serde_json::to_value(&self.initial),
            serde_json::to_value(&self.state.values),
        ) {
            (Ok(initial), Ok(values)) => !same_after_clean(&initial, &values),
            _ => true,
        }
    }

    /// Check if saving should be disabled: the form is invalid or unchanged.
    pub fn not_valid(&self) -> bool {
        !self.is_valid() || !self.is_dirty()
    }

    /// Get the error for `field` once it has been touched.
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if self.state.touched.is_touched(field) {
            self.state.errors.get(field)
        } else {
            None
        }
    }

    /// Read the working value at a dotted field path.
    pub fn field_value(&self, field_path: &str) -> Option<Value> {
        let root = serde_json::to_value(&self.state.values).ok()?;
        get_path(&root, field_path).cloned()
    }

    /// Check if a submission is waiting for its result.
    pub fn is_submitting(&self) -> bool {
        self.pending_submit.is_some()
    }

    // --- Mutation ---

    /// Set the value at `field_path` in the working record.
    ///
    /// # Errors
    ///
    /// Returns `FieldPath` if the path cannot be set or the result no longer
    /// fits the record type, or a store error if the draft cannot be written.
    pub fn change_value<V: Serialize>(&mut self, value: V, field_path: &str) -> Result<()> {
        let field_error = |message: String| EvfieldError::FieldPath {
            path: field_path.to_string(),
            message,
        };

        let value = serde_json::to_value(value).map_err(|e| field_error(e.to_string()))?;
        let mut root = self.values_json()?;
        set_path(&mut root, field_path, value).map_err(field_error)?;
        let values: M = serde_json::from_value(root).map_err(|e| field_error(e.to_string()))?;

        self.state.values = values;
        if self.validate_on_change {
            self.validate_now();
        }
        self.persist_values()
    }

    /// Mark a field touched from a blur event.
    ///
    /// A missing or empty field name is ignored.
    pub fn change_touched(&mut self, target_name: Option<&str>) {
        match target_name {
            Some(name) if !name.is_empty() => self.set_field_touched(name, true, None),
            _ => tracing::debug!("Ignoring blur without a field name"),
        }
    }

    /// Set the touched flag of `field`.
    ///
    /// Re-validates when `should_validate` is true, or when it is `None` and
    /// the form validates on blur.
    pub fn set_field_touched(&mut self, field: &str, touched: bool, should_validate: Option<bool>) {
        self.state.touched.set(field, touched);
        if should_validate.unwrap_or(self.validate_on_blur) {
            self.validate_now();
        }
    }

    /// Replace the working values.
    ///
    /// Re-validates when `should_validate` is true, or when it is `None` and
    /// the form validates on change.
    pub fn set_values(&mut self, values: M, should_validate: Option<bool>) -> Result<()> {
        self.state.values = values;
        if should_validate.unwrap_or(self.validate_on_change) {
            self.validate_now();
        }
        self.persist_values()
    }

    /// Replace the baseline snapshot.
    pub fn set_initial_values(&mut self, values: M) -> Result<()> {
        self.initial = values;
        if self.persists() {
            self.write_slot(&self.keys.initial, &self.initial)?;
        }
        Ok(())
    }

    /// Set the status flag.
    pub fn set_status(&mut self, restored: bool) {
        self.state.is_restored = restored;
    }

    // --- Validation ---

    /// Start a validation run against the current values.
    ///
    /// Issuing a ticket supersedes every earlier one.
    pub fn begin_validation(&mut self) -> ValidationTicket<M> {
        self.validation_seq += 1;
        ValidationTicket {
            seq: self.validation_seq,
            values: self.state.values.clone(),
            initial: self.initial.clone(),
        }
    }

    /// Apply the result of a validation run.
    ///
    /// Returns false, leaving the errors untouched, if a newer run was started
    /// after this one.
    pub fn finish_validation(&mut self, ticket: ValidationTicket<M>, errors: FieldErrors) -> bool {
        if ticket.seq != self.validation_seq {
            tracing::debug!(
                "Discarding stale validation #{} (latest #{})",
                ticket.seq,
                self.validation_seq
            );
            return false;
        }

        self.state.is_valid = errors.is_empty();
        self.state.errors = errors;
        true
    }

    /// Run the validator on the current values and apply the result.
    ///
    /// Returns whether the form is valid.
    pub fn validate_now(&mut self) -> bool {
        let ticket = self.begin_validation();
        let errors = match &self.validator {
            Some(validator) => validator.validate(&ticket.values, &ticket.initial),
            None => FieldErrors::new(),
        };
        self.finish_validation(ticket, errors);
        self.state.is_valid
    }

    // --- Submission ---

    /// Start a submission.
    ///
    /// Marks every top-level field touched and validates. Returns `None` if
    /// validation fails, otherwise a ticket holding the in-flight slot.
    ///
    /// # Errors
    ///
    /// Returns `SubmitInFlight` while another submission is pending.
    pub fn begin_submit(&mut self) -> Result<Option<SubmitTicket<M>>> {
        if self.pending_submit.is_some() {
            return Err(EvfieldError::SubmitInFlight);
        }

        self.touch_all()?;
        if !self.validate_now() {
            return Ok(None);
        }

        self.submit_seq += 1;
        self.pending_submit = Some(self.submit_seq);
        Ok(Some(SubmitTicket {
            seq: self.submit_seq,
            values: self.state.values.clone(),
            initial: self.initial.clone(),
        }))
    }

    /// Apply the result of a submission and release the in-flight slot.
    ///
    /// A returned record becomes both the working values and the baseline,
    /// in memory even when writing the slots fails. A failure is passed to
    /// the error handler and leaves both untouched.
    ///
    /// # Errors
    ///
    /// Returns `StaleSubmission` if `ticket` is not the pending submission,
    /// or a store error if the promoted record cannot be written.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket<M>,
        result: anyhow::Result<Option<M>>,
    ) -> Result<SubmitOutcome> {
        if self.pending_submit != Some(ticket.seq) {
            return Err(EvfieldError::StaleSubmission { seq: ticket.seq });
        }
        self.pending_submit = None;

        match result {
            Ok(Some(record)) => {
                self.promote(record)?;
                Ok(SubmitOutcome::Saved)
            }
            Ok(None) => Ok(SubmitOutcome::Submitted),
            Err(e) => {
                match self.on_error.as_mut() {
                    Some(handler) => handler(&e),
                    None => tracing::error!("Form '{}' submission failed: {:#}", self.key, e),
                }
                Ok(SubmitOutcome::Failed)
            }
        }
    }

    /// Validate and, if valid, run the submit callback.
    pub fn handle_submit(&mut self) -> Result<SubmitOutcome> {
        let Some(ticket) = self.begin_submit()? else {
            return Ok(SubmitOutcome::Invalid);
        };

        let result = match &self.submitter {
            Some(submitter) => submitter.submit(&ticket.values, &ticket.initial),
            None => Ok(None),
        };
        self.finish_submit(ticket, result)
    }

    // --- Persistence ---

    fn promote(&mut self, record: M) -> Result<()> {
        self.state.values = record.clone();
        self.initial = record;
        self.validate_now();
        if self.persists() {
            self.write_slot(&self.keys.draft, &self.state.values)?;
            self.write_slot(&self.keys.initial, &self.initial)?;
        }
        Ok(())
    }

    fn values_json(&self) -> Result<Value> {
        serde_json::to_value(&self.state.values).map_err(|e| EvfieldError::RecordShape {
            message: e.to_string(),
        })
    }

    fn touch_all(&mut self) -> Result<()> {
        if let Value::Object(map) = self.values_json()? {
            for field in map.keys() {
                self.state.touched.set(field.as_str(), true);
            }
        }
        Ok(())
    }

    fn persist_values(&self) -> Result<()> {
        if self.persists() {
            self.write_slot(&self.keys.draft, &self.state.values)?;
        }
        Ok(())
    }

    fn write_slot(&self, slot: &str, record: &M) -> Result<()> {
        let raw = envelope::encode(record, self.record_version)?;
        self.store
            .set(slot, &raw)
            .map_err(|e| EvfieldError::Store {
                key: slot.to_string(),
                message: e.to_string(),
            })
    }
}

fn read_slot<M: DeserializeOwned>(
    store: &dyn SessionStore,
    slot: &str,
    record_version: u32,
) -> Result<Option<M>> {
    let Some(raw) = store.get(slot).map_err(|e| EvfieldError::Store {
        key: slot.to_string(),
        message: e.to_string(),
    })?
    else {
        return Ok(None);
    };

    match envelope::decode(&raw, record_version) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            tracing::warn!("Discarding stored slot {}: {}", slot, e);
            Ok(None)
        }
    }
}

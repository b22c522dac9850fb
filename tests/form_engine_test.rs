//! Integration tests for the form engine public API.

use std::sync::Arc;

use evfield::form::{FieldErrors, FormConfig, FormEngine, SubmitOutcome};
use evfield::store::{envelope, MemoryStore, SessionStore};
use evfield::EvfieldError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Contact {
    name: String,
    #[serde(default)]
    tags: Vec<String>,
}

fn contact(name: &str) -> Contact {
    Contact {
        name: name.to_string(),
        tags: Vec::new(),
    }
}

fn shared_store() -> (Arc<MemoryStore>, Arc<dyn SessionStore>) {
    let store = Arc::new(MemoryStore::new());
    let dyn_store: Arc<dyn SessionStore> = store.clone();
    (store, dyn_store)
}

fn require_name(values: &Contact, _: &Contact) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if values.name.is_empty() {
        errors.insert("name", "Required");
    }
    errors
}

#[test]
fn remount_restores_draft_and_stored_baseline() {
    let (_, store) = shared_store();

    let config = FormConfig::new()
        .key("contact")
        .initial_values(contact("Ada"));
    let mut form = FormEngine::mount(config, store.clone()).unwrap();
    assert!(!form.is_restored());
    form.change_value("Grace", "name").unwrap();
    drop(form);

    let config = FormConfig::new()
        .key("contact")
        .initial_values(contact("Linus"));
    let form = FormEngine::mount(config, store).unwrap();

    assert!(form.is_restored());
    assert_eq!(form.values(), &contact("Grace"));
    assert_eq!(form.initial_values(), &contact("Ada"));
    assert!(form.is_dirty());
}

#[test]
fn empty_key_never_touches_the_store() {
    let (memory, store) = shared_store();

    let config = FormConfig::new().initial_values(contact("Ada"));
    let mut form = FormEngine::mount(config, store).unwrap();
    form.change_value("Grace", "name").unwrap();
    form.change_value(vec!["ops"], "tags").unwrap();
    form.set_initial_values(contact("Linus")).unwrap();

    assert!(!form.persists());
    assert!(memory.is_empty());
}

#[test]
fn unchanged_valid_form_cannot_be_saved() {
    let (_, store) = shared_store();
    let config = FormConfig::new()
        .key("contact")
        .initial_values(contact("Ada"))
        .on_validate(require_name);
    let mut form = FormEngine::mount(config, store).unwrap();

    assert!(form.validate_now());
    assert!(form.is_valid());
    assert!(form.not_valid());

    form.change_value("Grace", "name").unwrap();
    assert!(!form.not_valid());
}

#[test]
fn emptied_collections_count_as_unchanged() {
    let (_, store) = shared_store();
    let config = FormConfig::new()
        .key("contact")
        .initial_values(contact("Ada"));
    let mut form = FormEngine::mount(config, store).unwrap();

    form.change_value(vec!["ops"], "tags").unwrap();
    assert!(form.is_dirty());

    form.change_value(Vec::<String>::new(), "tags").unwrap();
    assert!(!form.is_dirty());
}

#[test]
fn successful_submit_promotes_returned_record() {
    let (memory, store) = shared_store();
    let config = FormConfig::new()
        .key("contact")
        .initial_values(contact("Ada"))
        .on_validate(require_name)
        .on_submit(
            |values: &Contact, _: &Contact| -> anyhow::Result<Option<Contact>> {
                let mut saved = values.clone();
                saved.tags.push("saved".to_string());
                Ok(Some(saved))
            },
        );
    let mut form = FormEngine::mount(config, store).unwrap();
    form.change_value("Grace", "name").unwrap();

    let outcome = form.handle_submit().unwrap();

    let expected = Contact {
        name: "Grace".to_string(),
        tags: vec!["saved".to_string()],
    };
    assert_eq!(outcome, SubmitOutcome::Saved);
    assert_eq!(form.values(), &expected);
    assert_eq!(form.initial_values(), &expected);
    assert!(form.not_valid());

    let stored = memory.get("data-form-contact-initial").unwrap().unwrap();
    let baseline: Contact = envelope::decode(&stored, 1).unwrap();
    assert_eq!(baseline, expected);
}

#[test]
fn failed_submit_keeps_values_and_reports_error() {
    let (_, store) = shared_store();
    let reported = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = reported.clone();

    let config = FormConfig::new()
        .key("contact")
        .initial_values(contact("Ada"))
        .on_submit(
            |_: &Contact, _: &Contact| -> anyhow::Result<Option<Contact>> {
                anyhow::bail!("service unavailable")
            },
        )
        .on_error(move |e| sink.lock().unwrap().push(e.to_string()));
    let mut form = FormEngine::mount(config, store).unwrap();
    form.change_value("Grace", "name").unwrap();

    let outcome = form.handle_submit().unwrap();

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(form.values(), &contact("Grace"));
    assert_eq!(form.initial_values(), &contact("Ada"));
    assert!(!form.is_submitting());
    assert_eq!(*reported.lock().unwrap(), vec!["service unavailable"]);
}

#[test]
fn invalid_form_is_not_submitted() {
    let (_, store) = shared_store();
    let config = FormConfig::new()
        .key("contact")
        .initial_values(contact("Ada"))
        .on_validate(require_name)
        .on_submit(
            |_: &Contact, _: &Contact| -> anyhow::Result<Option<Contact>> {
                panic!("submit must not run for an invalid form")
            },
        );
    let mut form = FormEngine::mount(config, store).unwrap();
    form.change_value("", "name").unwrap();

    assert_eq!(form.handle_submit().unwrap(), SubmitOutcome::Invalid);
    assert_eq!(form.visible_error("name"), Some("Required"));
}

#[test]
fn blur_without_target_is_ignored() {
    let (_, store) = shared_store();
    let config = FormConfig::new()
        .key("contact")
        .initial_values(contact("Ada"));
    let mut form = FormEngine::mount(config, store).unwrap();
    form.change_touched(Some("name"));
    let before = form.touched().clone();

    form.change_touched(None);
    form.change_touched(Some(""));

    assert_eq!(form.touched(), &before);
    assert!(form.touched().is_touched("name"));
}

#[test]
fn overtaken_validation_is_discarded() {
    let (_, store) = shared_store();
    let config = FormConfig::new()
        .key("contact")
        .initial_values(contact("Ada"));
    let mut form = FormEngine::mount(config, store).unwrap();

    let first = form.begin_validation();
    let second = form.begin_validation();
    assert!(second.seq() > first.seq());

    let stale: FieldErrors = [("name", "Busy")].into_iter().collect();
    assert!(!form.finish_validation(first, stale));
    assert!(form.errors().is_empty());

    assert!(form.finish_validation(second, FieldErrors::new()));
    assert!(form.is_valid());
}

#[test]
fn second_submit_while_pending_is_rejected() {
    let (_, store) = shared_store();
    let config = FormConfig::new()
        .key("contact")
        .initial_values(contact("Ada"));
    let mut form = FormEngine::mount(config, store).unwrap();
    form.change_value("Grace", "name").unwrap();

    let ticket = form.begin_submit().unwrap().unwrap();
    assert!(form.is_submitting());
    assert!(matches!(
        form.begin_submit(),
        Err(EvfieldError::SubmitInFlight)
    ));

    let outcome = form.finish_submit(ticket, Ok(None)).unwrap();
    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert!(!form.is_submitting());
    assert!(form.begin_submit().unwrap().is_some());
}

#[test]
fn draft_for_other_record_version_is_discarded() {
    let (_, store) = shared_store();

    let config = FormConfig::new()
        .key("contact")
        .record_version(1)
        .initial_values(contact("Ada"));
    let mut form = FormEngine::mount(config, store.clone()).unwrap();
    form.change_value("Grace", "name").unwrap();
    drop(form);

    let config = FormConfig::new()
        .key("contact")
        .record_version(2)
        .initial_values(contact("Linus"));
    let form = FormEngine::mount(config, store).unwrap();

    assert!(!form.is_restored());
    assert_eq!(form.values(), &contact("Linus"));
    assert_eq!(form.initial_values(), &contact("Linus"));
}

#[test]
fn malformed_draft_is_discarded() {
    let (memory, store) = shared_store();
    memory.set("data-form-contact", "{not json").unwrap();

    let config = FormConfig::new()
        .key("contact")
        .initial_values(contact("Ada"));
    let form = FormEngine::mount(config, store).unwrap();

    assert!(!form.is_restored());
    assert_eq!(form.values(), &contact("Ada"));
}

#[test]
fn bad_field_path_is_reported() {
    let (_, store) = shared_store();
    let config = FormConfig::new()
        .key("contact")
        .initial_values(contact("Ada"));
    let mut form = FormEngine::mount(config, store).unwrap();

    let err = form.change_value(5, "name.first").unwrap_err();

    assert!(matches!(err, EvfieldError::FieldPath { .. }));
    assert_eq!(form.values(), &contact("Ada"));
}

#[test]
fn array_index_past_the_end_is_a_path_error() {
    let (_, store) = shared_store();
    let config = FormConfig::new()
        .key("contact")
        .initial_values(contact("Ada"));
    let mut form = FormEngine::mount(config, store).unwrap();

    form.change_value("admin", "tags.0").unwrap();
    let err = form
        .change_value("ops", "tags.99999999999999")
        .unwrap_err();

    assert!(matches!(err, EvfieldError::FieldPath { .. }));
    assert_eq!(form.values().tags, vec!["admin".to_string()]);
}

//! Integration tests for the config and store public APIs.

use evfield::config::{load_config, validate, AppConfig, FlagOverrides};
use evfield::store::{envelope, FileStore, SessionStore, StoreKeys};
use evfield::ui::OutputMode;
use evfield::EvfieldError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn full_config_workflow() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".evfield");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config.yml"),
        r#"
service_url: https://collector.example.com/api
timeout_secs: 10
output: verbose
"#,
    )
    .unwrap();

    let mut config = load_config(temp.path(), None).unwrap();
    FlagOverrides {
        service_url: None,
        draft_dir: Some(temp.path().join("drafts")),
        output: Some(OutputMode::Quiet),
    }
    .apply(&mut config);
    validate(&config).unwrap();

    assert_eq!(
        config.service_url.as_deref(),
        Some("https://collector.example.com/api")
    );
    assert_eq!(config.timeout_secs, 10);
    assert_eq!(config.draft_dir(), temp.path().join("drafts"));
    assert_eq!(config.output_mode(), OutputMode::Quiet);
}

#[test]
fn invalid_config_fails_validation() {
    let config = AppConfig {
        service_url: Some("not a url".to_string()),
        ..AppConfig::default()
    };

    assert!(matches!(
        validate(&config),
        Err(EvfieldError::ConfigValidationError { .. })
    ));
}

#[test]
fn explicit_config_path_is_used() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.yml");
    fs::write(&path, "draft_dir: /tmp/custom-drafts\n").unwrap();

    let config = load_config(temp.path(), Some(&path)).unwrap();

    assert_eq!(config.draft_dir(), PathBuf::from("/tmp/custom-drafts"));
}

#[test]
fn file_store_survives_reopening() {
    let temp = TempDir::new().unwrap();
    let keys = StoreKeys::for_form("event-field");

    let store = FileStore::new(temp.path());
    let payload = envelope::encode(&vec!["a", "b"], 1).unwrap();
    store.set(&keys.draft, &payload).unwrap();
    drop(store);

    let reopened = FileStore::new(temp.path());
    let raw = reopened.get(&keys.draft).unwrap().unwrap();
    let record: Vec<String> = envelope::decode(&raw, 1).unwrap();

    assert_eq!(record, vec!["a", "b"]);
    assert_eq!(reopened.keys().unwrap(), vec![keys.draft.clone()]);
    assert!(reopened.get(&keys.initial).unwrap().is_none());
}

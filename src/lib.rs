//! evfield - Event field editor with a draft-persisting form engine.
//!
//! The heart of the crate is [`form`], a generic form-state engine: it tracks
//! working values against a saved baseline, runs validation, guards
//! submission, and keeps a draft in a session store so unsaved edits survive
//! a restart. The event field editor is built on top of it.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, layering, and validation
//! - [`editor`] - Event field create/edit controller and terminal screen
//! - [`error`] - Error types and result aliases
//! - [`form`] - Form state, validation tickets, and draft persistence
//! - [`model`] - The event field record and its validation rules
//! - [`service`] - Client for the event field service
//! - [`store`] - Session-scoped draft storage
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use evfield::form::{FormConfig, FormEngine};
//! use evfield::model::EventField;
//! use evfield::store::{MemoryStore, SessionStore};
//!
//! let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
//! let config = FormConfig::new()
//!     .key("event-field")
//!     .initial_values(EventField::default());
//! let mut form = FormEngine::mount(config, store.clone()).unwrap();
//!
//! form.change_value("PortNumber", "FieldName").unwrap();
//!
//! assert!(form.is_dirty());
//! assert!(store.get("data-form-event-field").unwrap().is_some());
//! ```

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod form;
pub mod model;
pub mod service;
pub mod store;
pub mod ui;

pub use error::{EvfieldError, Result};

//! Generic form state with draft persistence.
//!
//! A [`FormEngine`] owns the working values of one record, the baseline they
//! were loaded from, per-field errors and touched flags. Given a non-empty
//! key it mirrors the values and the baseline into a
//! [`SessionStore`](crate::store::SessionStore) on every change, so an
//! unsaved edit survives the form being closed and reopened.
//!
//! Validation and submission can be driven in one call
//! ([`FormEngine::validate_now`], [`FormEngine::handle_submit`]) or split
//! into a begin/finish pair when the work happens elsewhere. Split
//! validation discards results that were overtaken by a newer run; split
//! submission allows only one submission in flight.

mod clean;
mod config;
mod engine;
mod fields;
pub mod path;
mod ticket;

pub use clean::{clean, same_after_clean};
pub use config::{ErrorHandler, FormConfig, FormSubmitter, FormValidator};
pub use engine::{FormEngine, FormState};
pub use fields::{FieldErrors, TouchedFields};
pub use ticket::{SubmitOutcome, SubmitTicket, ValidationTicket};

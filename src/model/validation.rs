//! Event field validation rules.
//!
//! `FieldName` is checked in order, stopping at the first failure:
//! - present (not empty or whitespace only)
//! - no reserved collector prefix (`SNMP.`, `WMI.`, ... in any case)
//! - dotted PascalCase segments
//! - unique, unless unchanged from the baseline
//!
//! `ShortDescription` must be unique when set and changed. Uniqueness is
//! asked of the event field service; without one the check is skipped.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::form::{FieldErrors, FormValidator};
use crate::service::EventFieldService;

use super::EventField;

/// Name prefixes owned by collectors.
pub const RESERVED_PREFIXES: [&str; 6] = ["SNMP.", "WMI.", "SYSLOG.", "SQL.", "XFLOW.", "FILE."];

/// Maximum length of `LongDescription`, in characters.
pub const LONG_DESCRIPTION_MAX: usize = 500;

static FIELD_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-z]*(\.[A-Z][a-z]*)*)*$").expect("FIELD_NAME_REGEX must compile")
});

static RESERVED_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(SNMP|WMI|SYSLOG|SQL|XFLOW|FILE)\.")
        .expect("RESERVED_PREFIX_REGEX must compile")
});

/// A validation failure for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMessage {
    Required,
    ReservedPrefix,
    EnterCorrectData,
    Busy,
    TooLong,
    Unverified,
}

impl ValidationMessage {
    /// User-facing text.
    pub fn text(&self) -> &'static str {
        match self {
            ValidationMessage::Required => "Required",
            ValidationMessage::ReservedPrefix => {
                "Name must not begin with SNMP., WMI., SYSLOG., SQL., XFLOW. or FILE."
            }
            ValidationMessage::EnterCorrectData => "Enter correct data",
            ValidationMessage::Busy => "Busy",
            ValidationMessage::TooLong => "Must be at most 500 characters",
            ValidationMessage::Unverified => "Could not verify uniqueness",
        }
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Validator for [`EventField`] forms.
#[derive(Clone)]
pub struct EventFieldValidator {
    service: Option<Arc<dyn EventFieldService>>,
}

impl EventFieldValidator {
    /// Create a validator that checks uniqueness against `service`.
    pub fn new(service: Arc<dyn EventFieldService>) -> Self {
        Self {
            service: Some(service),
        }
    }

    /// Create a validator that skips uniqueness checks.
    pub fn offline() -> Self {
        Self { service: None }
    }

    /// Check if uniqueness checks are skipped.
    pub fn is_offline(&self) -> bool {
        self.service.is_none()
    }

    /// Validate `values` against the `initial` baseline.
    pub fn validate(&self, values: &EventField, initial: &EventField) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if let Some(message) = self.check_field_name(values, initial) {
            errors.insert("FieldName", message.text());
        }

        if !values.short_description.is_empty()
            && values.short_description != initial.short_description
        {
            if let Some(message) = self.check_unique("ShortDescription", &values.short_description)
            {
                errors.insert("ShortDescription", message.text());
            }
        }

        if values.long_description.chars().count() > LONG_DESCRIPTION_MAX {
            errors.insert("LongDescription", ValidationMessage::TooLong.text());
        }

        errors
    }

    fn check_field_name(
        &self,
        values: &EventField,
        initial: &EventField,
    ) -> Option<ValidationMessage> {
        let name = values.field_name.as_str();

        if name.trim().is_empty() {
            return Some(ValidationMessage::Required);
        }
        if has_reserved_prefix(name) {
            return Some(ValidationMessage::ReservedPrefix);
        }
        if !is_field_name(name) {
            return Some(ValidationMessage::EnterCorrectData);
        }
        if name == initial.field_name {
            return None;
        }
        self.check_unique("FieldName", name)
    }

    fn check_unique(&self, field: &str, value: &str) -> Option<ValidationMessage> {
        let service = self.service.as_ref()?;
        match service.check(value) {
            Ok(true) => None,
            Ok(false) => Some(ValidationMessage::Busy),
            Err(e) => {
                tracing::warn!("Uniqueness check for {} '{}' failed: {}", field, value, e);
                Some(ValidationMessage::Unverified)
            }
        }
    }
}

impl FormValidator<EventField> for EventFieldValidator {
    fn validate(&self, values: &EventField, initial: &EventField) -> FieldErrors {
        EventFieldValidator::validate(self, values, initial)
    }
}

/// Check if `name` is dotted PascalCase (`Port`, `Port.Number`).
pub fn is_field_name(name: &str) -> bool {
    FIELD_NAME_REGEX.is_match(name)
}

/// Check if `name` begins with a collector-reserved prefix.
pub fn has_reserved_prefix(name: &str) -> bool {
    RESERVED_PREFIX_REGEX.is_match(name)
}

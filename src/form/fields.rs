//! Per-field error and touched maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Validation messages keyed by field path.
///
/// A field without an entry has no error; an empty map means the form is
/// valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Create an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Get the error for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Check if `field` has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Check if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Touched flags keyed by field path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouchedFields(BTreeMap<String, bool>);

impl TouchedFields {
    /// Create an empty touched map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the touched flag for `field`.
    pub fn set(&mut self, field: impl Into<String>, touched: bool) {
        self.0.insert(field.into(), touched);
    }

    /// Check if `field` is touched.
    pub fn is_touched(&self, field: &str) -> bool {
        self.0.get(field).copied().unwrap_or(false)
    }

    /// Check if no field has a flag recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(field, touched)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

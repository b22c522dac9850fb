//! In-process event field service for tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use crate::model::EventField;

use super::{EventFieldService, ServiceError, ServiceResult};

/// A call received by [`MockEventFieldService`].
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Get(String),
    Create(EventField),
    Update(String, EventField),
    Check(String),
}

#[derive(Debug, Default)]
struct MockState {
    records: BTreeMap<String, EventField>,
    taken: BTreeSet<String>,
    calls: Vec<MockCall>,
}

/// Event field service backed by memory.
///
/// A value is unavailable when it was marked taken or is the name or short
/// description of a stored record. Created records get sequential ids.
#[derive(Debug, Default)]
pub struct MockEventFieldService {
    state: Mutex<MockState>,
    check_failure: Option<u16>,
    write_failure: Option<(u16, Option<String>)>,
}

impl MockEventFieldService {
    /// Create an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` under `id`.
    pub fn with_record(self, id: impl Into<String>, record: EventField) -> Self {
        self.state().records.insert(id.into(), record);
        self
    }

    /// Mark values as unavailable.
    pub fn with_taken<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state()
            .taken
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Fail every uniqueness check with `status`.
    pub fn fail_checks(mut self, status: u16) -> Self {
        self.check_failure = Some(status);
        self
    }

    /// Fail every create and update with `status` and an optional synopsis.
    pub fn fail_writes(mut self, status: u16, synopsis: Option<&str>) -> Self {
        self.write_failure = Some((status, synopsis.map(String::from)));
        self
    }

    /// All calls received so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    /// Values passed to `check`.
    pub fn checked(&self) -> Vec<String> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                MockCall::Check(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Get a stored record.
    pub fn record(&self, id: &str) -> Option<EventField> {
        self.state().records.get(id).cloned()
    }

    /// Number of stored records.
    pub fn record_count(&self) -> usize {
        self.state().records.len()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_error(&self) -> ServiceResult<()> {
        match &self.write_failure {
            Some((status, synopsis)) => Err(ServiceError::Status {
                status: *status,
                synopsis: synopsis.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl EventFieldService for MockEventFieldService {
    fn get(&self, id: &str) -> ServiceResult<Option<EventField>> {
        let mut state = self.state();
        state.calls.push(MockCall::Get(id.to_string()));
        Ok(state.records.get(id).cloned())
    }

    fn create(&self, record: &EventField) -> ServiceResult<()> {
        self.state().calls.push(MockCall::Create(record.clone()));
        self.write_error()?;

        let mut state = self.state();
        let id = (state.records.len() + 1).to_string();
        state.records.insert(id, record.clone());
        Ok(())
    }

    fn update(&self, id: &str, record: &EventField) -> ServiceResult<()> {
        self.state()
            .calls
            .push(MockCall::Update(id.to_string(), record.clone()));
        self.write_error()?;

        let mut state = self.state();
        if !state.records.contains_key(id) {
            return Err(ServiceError::Status {
                status: 404,
                synopsis: Some(format!("Event field {} not found", id)),
            });
        }
        state.records.insert(id.to_string(), record.clone());
        Ok(())
    }

    fn check(&self, value: &str) -> ServiceResult<bool> {
        let mut state = self.state();
        state.calls.push(MockCall::Check(value.to_string()));

        if let Some(status) = self.check_failure {
            return Err(ServiceError::Status {
                status,
                synopsis: None,
            });
        }

        let in_use = state.taken.contains(value)
            || state
                .records
                .values()
                .any(|r| r.field_name == value || r.short_description == value);
        Ok(!in_use)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_reports_taken_and_stored_values() {
        let service = MockEventFieldService::new()
            .with_taken(["Busy.Name"])
            .with_record("1", EventField::named("Port"));

        assert!(!service.check("Busy.Name").unwrap());
        assert!(!service.check("Port").unwrap());
        assert!(service.check("Free").unwrap());
        assert_eq!(service.checked(), vec!["Busy.Name", "Port", "Free"]);
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let service = MockEventFieldService::new();
        service.create(&EventField::named("A")).unwrap();
        service.create(&EventField::named("B")).unwrap();

        assert_eq!(service.record("2"), Some(EventField::named("B")));
        assert!(!service.check("B").unwrap());
    }

    #[test]
    fn update_of_unknown_id_is_404() {
        let service = MockEventFieldService::new();
        let err = service.update("9", &EventField::named("A")).unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 404, .. }));
    }

    #[test]
    fn write_failure_is_recorded_but_not_applied() {
        let service = MockEventFieldService::new()
            .with_record("1", EventField::named("A"))
            .fail_writes(409, Some("Conflict"));

        let err = service.update("1", &EventField::named("B")).unwrap_err();

        assert_eq!(err.synopsis(), Some("Conflict"));
        assert_eq!(service.record("1"), Some(EventField::named("A")));
        assert_eq!(service.calls().len(), 1);
    }
}

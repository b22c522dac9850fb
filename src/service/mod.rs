//! Event field service access.
//!
//! The service stores event field definitions and answers uniqueness
//! checks for names and descriptions.

mod http;
mod mock;

pub use http::{HttpEventFieldService, DEFAULT_TIMEOUT, RESOURCE};
pub use mock::{MockCall, MockEventFieldService};

use thiserror::Error;

use crate::model::EventField;

/// Result alias for service calls.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Errors from the event field service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service answered with a non-success status.
    #[error("Service returned HTTP {status}")]
    Status {
        status: u16,
        synopsis: Option<String>,
    },

    /// The request could not be completed.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not what the service should send.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The client is misconfigured.
    #[error("Invalid service configuration: {0}")]
    Config(String),
}

impl ServiceError {
    /// Short explanation supplied by the service, if any.
    pub fn synopsis(&self) -> Option<&str> {
        match self {
            ServiceError::Status { synopsis, .. } => synopsis.as_deref(),
            _ => None,
        }
    }
}

/// Access to stored event field definitions.
pub trait EventFieldService: Send + Sync {
    /// Fetch a definition by id. Returns `None` if it does not exist.
    fn get(&self, id: &str) -> ServiceResult<Option<EventField>>;

    /// Store a new definition.
    fn create(&self, record: &EventField) -> ServiceResult<()>;

    /// Replace the definition with the given id.
    fn update(&self, id: &str, record: &EventField) -> ServiceResult<()>;

    /// Check if `value` is free to use as a name or description.
    fn check(&self, value: &str) -> ServiceResult<bool>;
}

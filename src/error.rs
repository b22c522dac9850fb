//! Error types for evfield operations.
//!
//! This module defines [`EvfieldError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `EvfieldError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `EvfieldError::Other`) for unexpected errors
//! - Remote service failures keep their own [`ServiceError`] type and are
//!   wrapped here only when they cross into form or CLI code
//!
//! [`ServiceError`]: crate::service::ServiceError

use std::path::PathBuf;
use thiserror::Error;

use crate::service::ServiceError;

/// Core error type for evfield operations.
#[derive(Debug, Error)]
pub enum EvfieldError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A field path could not be written into the working record.
    #[error("Cannot set field '{path}': {message}")]
    FieldPath { path: String, message: String },

    /// The working record no longer fits the form's record type.
    #[error("Record shape mismatch: {message}")]
    RecordShape { message: String },

    /// A submission was started while another one is still pending.
    #[error("A submission is already in progress")]
    SubmitInFlight,

    /// A submission result arrived for a submission that is no longer pending.
    #[error("Submission #{seq} is not the pending submission")]
    StaleSubmission { seq: u64 },

    /// Reading or writing the session store failed.
    #[error("Session store error for '{key}': {message}")]
    Store { key: String, message: String },

    /// Remote event field service failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for evfield operations.
pub type Result<T> = std::result::Result<T, EvfieldError>;

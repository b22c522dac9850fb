//! Versioned payload written into draft slots.
//!
//! Every slot holds a JSON envelope:
//!
//! ```json
//! { "format": 1, "record_version": 1, "saved_at": "2026-01-01T00:00:00Z", "record": { ... } }
//! ```
//!
//! `format` versions the envelope itself; `record_version` is chosen by the
//! form owning the slot and is bumped whenever the record's shape changes.
//! A slot that does not match both is rejected on read so a stale draft is
//! dropped instead of being rendered with the wrong shape.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{EvfieldError, Result};

/// Current envelope format.
pub const ENVELOPE_FORMAT: u32 = 1;

/// Envelope stored in each draft slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftEnvelope {
    /// Envelope format version.
    pub format: u32,
    /// Record schema version chosen by the form.
    pub record_version: u32,
    /// When the slot was written.
    pub saved_at: DateTime<Utc>,
    /// The record itself.
    pub record: serde_json::Value,
}

/// Why a stored slot was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// The slot is not an envelope at all.
    #[error("malformed draft envelope: {0}")]
    Malformed(String),

    /// The envelope was written by an incompatible format.
    #[error("unsupported envelope format {found} (expected {})", ENVELOPE_FORMAT)]
    Format { found: u32 },

    /// The record was written for a different record version.
    #[error("record version {found} does not match {expected}")]
    RecordVersion { found: u32, expected: u32 },

    /// The record no longer deserializes into the form's type.
    #[error("stored record does not fit the form: {0}")]
    Shape(String),
}

/// Serialize `record` into an envelope string.
pub fn encode<M: Serialize>(record: &M, record_version: u32) -> Result<String> {
    let record = serde_json::to_value(record).map_err(|e| EvfieldError::RecordShape {
        message: e.to_string(),
    })?;

    let envelope = DraftEnvelope {
        format: ENVELOPE_FORMAT,
        record_version,
        saved_at: Utc::now(),
        record,
    };

    serde_json::to_string(&envelope).map_err(|e| EvfieldError::RecordShape {
        message: e.to_string(),
    })
}

/// Parse an envelope string and extract its record.
pub fn decode<M: DeserializeOwned>(
    raw: &str,
    record_version: u32,
) -> std::result::Result<M, DecodeError> {
    let envelope: DraftEnvelope =
        serde_json::from_str(raw).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    if envelope.format != ENVELOPE_FORMAT {
        return Err(DecodeError::Format {
            found: envelope.format,
        });
    }

    if envelope.record_version != record_version {
        return Err(DecodeError::RecordVersion {
            found: envelope.record_version,
            expected: record_version,
        });
    }

    serde_json::from_value(envelope.record).map_err(|e| DecodeError::Shape(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
    }

    #[test]
    fn encoded_envelope_carries_versions() {
        let raw = encode(&Sample { name: "x".into() }, 3).unwrap();
        let envelope: DraftEnvelope = serde_json::from_str(&raw).unwrap();

        assert_eq!(envelope.format, ENVELOPE_FORMAT);
        assert_eq!(envelope.record_version, 3);
        assert_eq!(envelope.record, json!({ "name": "x" }));
    }

    #[test]
    fn decode_accepts_matching_version() {
        let raw = encode(&Sample { name: "x".into() }, 1).unwrap();
        let sample: Sample = decode(&raw, 1).unwrap();
        assert_eq!(sample.name, "x");
    }

    #[test]
    fn decode_rejects_other_record_version() {
        let raw = encode(&Sample { name: "x".into() }, 1).unwrap();
        let err = decode::<Sample>(&raw, 2).unwrap_err();
        assert_eq!(
            err,
            DecodeError::RecordVersion {
                found: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn decode_rejects_unknown_format() {
        let raw = json!({
            "format": 99,
            "record_version": 1,
            "saved_at": "2026-01-01T00:00:00Z",
            "record": { "name": "x" }
        })
        .to_string();

        let err = decode::<Sample>(&raw, 1).unwrap_err();
        assert_eq!(err, DecodeError::Format { found: 99 });
    }

    #[test]
    fn decode_rejects_bare_record() {
        // Unversioned payloads are not accepted.
        let raw = json!({ "name": "x" }).to_string();
        assert!(matches!(
            decode::<Sample>(&raw, 1),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn decode_rejects_mismatched_shape() {
        let raw = json!({
            "format": ENVELOPE_FORMAT,
            "record_version": 1,
            "saved_at": "2026-01-01T00:00:00Z",
            "record": { "title": 5 }
        })
        .to_string();

        assert!(matches!(decode::<Sample>(&raw, 1), Err(DecodeError::Shape(_))));
    }
}

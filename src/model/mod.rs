//! Event field record definitions.
//!
//! An event field describes one attribute of collected telemetry events:
//! its dotted PascalCase name, human descriptions, value type and origin.
//! Records are exchanged with the event field service using PascalCase
//! member names.

pub mod validation;

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use validation::{EventFieldValidator, ValidationMessage, LONG_DESCRIPTION_MAX};

/// Render hints understood by event viewers.
pub const RENDER_TYPES: [&str; 11] = [
    "unknown", "number", "text", "hex", "base64", "time", "docKey", "bool", "ip", "json", "url",
];

/// An event field definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct EventField {
    /// Dotted PascalCase name, e.g. `Port.Number`
    #[serde(default)]
    pub field_name: String,

    /// Short human-readable name
    #[serde(default)]
    pub short_description: String,

    /// Free-form description
    #[serde(default)]
    pub long_description: String,

    /// Type of the field's values
    #[serde(default)]
    pub value_type: ValueType,

    /// Ordering hint for event viewers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_priority: Option<i64>,

    /// One of [`RENDER_TYPES`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_type: Option<String>,

    /// Who defined the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,

    /// Collector type for collector-defined fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,

    /// Sample or default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Exclude the field from similarity search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_similarity_threshold: Option<bool>,

    /// Skip total counting for the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_total: Option<bool>,
}

impl EventField {
    /// Create a record with only a name set.
    pub fn named(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            ..Self::default()
        }
    }
}

/// Value type of an event field.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    #[default]
    String,
    Int,
    Int32,
    Int64,
    IntSlice,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uint64Slice,
    Float32,
    Float64,
    Bytes,
    Time,
    Bool,
    Ip,
    IpSlice,
    StringSlice,
}

impl ValueType {
    /// All value types in display order.
    pub const ALL: [ValueType; 18] = [
        ValueType::String,
        ValueType::Int,
        ValueType::Int32,
        ValueType::Int64,
        ValueType::IntSlice,
        ValueType::Uint8,
        ValueType::Uint16,
        ValueType::Uint32,
        ValueType::Uint64,
        ValueType::Uint64Slice,
        ValueType::Float32,
        ValueType::Float64,
        ValueType::Bytes,
        ValueType::Time,
        ValueType::Bool,
        ValueType::Ip,
        ValueType::IpSlice,
        ValueType::StringSlice,
    ];

    /// Wire name of the value type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Int32 => "int32",
            ValueType::Int64 => "int64",
            ValueType::IntSlice => "int_slice",
            ValueType::Uint8 => "uint8",
            ValueType::Uint16 => "uint16",
            ValueType::Uint32 => "uint32",
            ValueType::Uint64 => "uint64",
            ValueType::Uint64Slice => "uint64_slice",
            ValueType::Float32 => "float32",
            ValueType::Float64 => "float64",
            ValueType::Bytes => "bytes",
            ValueType::Time => "time",
            ValueType::Bool => "bool",
            ValueType::Ip => "ip",
            ValueType::IpSlice => "ip_slice",
            ValueType::StringSlice => "string_slice",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown value type '{}'", s))
    }
}

/// Origin of an event field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Core,
    Collector,
    Ecs,
    User,
}

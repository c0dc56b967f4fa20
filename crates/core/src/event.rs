//! Typed trace events
//!
//! Events arrive already parsed by the trace reader: a name, a nanosecond
//! timestamp, the host (trace) they were recorded on, and a bag of typed
//! fields. Events are read-only for the projection.

use crate::error::FieldError;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix under which LTTng stores per-event context fields
const CONTEXT_PREFIX: &str = "context._";

/// A typed event field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Integer field
    Int(i64),
    /// String field
    Str(String),
    /// Enumeration field carrying both its numeric value and label
    Enum {
        /// Numeric value
        value: i64,
        /// Symbolic label
        label: String,
    },
}

impl FieldValue {
    /// Returns the type name as a string (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Int(_) => "Int",
            FieldValue::Str(_) => "Str",
            FieldValue::Enum { .. } => "Enum",
        }
    }
}

/// A trace event
///
/// # Examples
///
/// ```
/// use tracestate_core::{Event, FieldValue};
///
/// let event = Event::new("osd:opwq_process_start", 1_000, "node-1")
///     .with_field("context._vpid", FieldValue::Int(42))
///     .with_field("context._vtid", FieldValue::Int(7));
///
/// assert_eq!(event.int("vpid").unwrap(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event name, e.g. `zipkin:timestamp`
    pub name: String,
    /// Event time
    pub timestamp: Timestamp,
    /// Host (trace) the event was recorded on
    pub host: String,
    /// Payload and context fields
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Event {
    /// Create an event with no fields
    pub fn new(name: impl Into<String>, nanos: i64, host: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timestamp: Timestamp::from_nanos(nanos),
            host: host.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion
    pub fn with_field(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Look up a field by key
    ///
    /// Falls back to the `context._<key>` form when the bare key is absent.
    pub fn field(&self, key: &str) -> Result<&FieldValue, FieldError> {
        if let Some(value) = self.fields.get(key) {
            return Ok(value);
        }
        self.fields
            .get(&format!("{}{}", CONTEXT_PREFIX, key))
            .ok_or_else(|| FieldError::Missing {
                key: key.to_string(),
            })
    }

    /// Read an integer field
    pub fn int(&self, key: &str) -> Result<i64, FieldError> {
        match self.field(key)? {
            FieldValue::Int(i) => Ok(*i),
            other => Err(wrong_type(key, "Int", other)),
        }
    }

    /// Read a string field
    pub fn string(&self, key: &str) -> Result<&str, FieldError> {
        match self.field(key)? {
            FieldValue::Str(s) => Ok(s),
            other => Err(wrong_type(key, "Str", other)),
        }
    }

    /// Read the label of an enumeration field
    ///
    /// A plain string field is accepted as a bare label.
    pub fn label(&self, key: &str) -> Result<&str, FieldError> {
        match self.field(key)? {
            FieldValue::Enum { label, .. } => Ok(label),
            FieldValue::Str(s) => Ok(s),
            other => Err(wrong_type(key, "Enum", other)),
        }
    }
}

fn wrong_type(key: &str, expected: &'static str, actual: &FieldValue) -> FieldError {
    FieldError::WrongType {
        key: key.to_string(),
        expected,
        actual: actual.type_name(),
    }
}

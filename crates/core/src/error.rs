//! Error types for the attribute store contract and event field access

use crate::types::{Quark, Timestamp};
use thiserror::Error;

/// Errors raised by an [`AttributeStore`](crate::AttributeStore) backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `mutate_ongoing` on an attribute with no open interval
    #[error("no ongoing interval on attribute {quark}")]
    NoOngoingInterval {
        /// Attribute that was targeted
        quark: Quark,
    },

    /// A write earlier than the ongoing interval's start, or, with nothing
    /// open, earlier than the end of the last committed interval
    #[error("write at {ts} precedes {start} on attribute {quark}")]
    TimeOrdering {
        /// Attribute that was targeted
        quark: Quark,
        /// Earliest accepted time
        start: Timestamp,
        /// Rejected write time
        ts: Timestamp,
    },

    /// Quark not allocated by this store
    #[error("unknown attribute {0}")]
    UnknownQuark(Quark),

    /// Every quark value is allocated
    #[error("attribute tree is full ({allocated} quarks)")]
    QuarkSpaceExhausted {
        /// Quarks already allocated
        allocated: usize,
    },
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised when reading a typed field off an [`Event`](crate::Event)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Required field is absent
    #[error("missing field '{key}'")]
    Missing {
        /// Field key
        key: String,
    },

    /// Field present with an unexpected type
    #[error("field '{key}': expected {expected}, got {actual}")]
    WrongType {
        /// Field key
        key: String,
        /// Expected type name
        expected: &'static str,
        /// Actual type name
        actual: &'static str,
    },
}

impl FieldError {
    /// Key of the offending field
    pub fn key(&self) -> &str {
        match self {
            FieldError::Missing { key } | FieldError::WrongType { key, .. } => key,
        }
    }
}

//! Projection error taxonomy
//!
//! | Error | Severity | Effect |
//! |-------|----------|--------|
//! | Malformed | recoverable | event dropped, no store write |
//! | MutateWithoutOpen | recoverable | event dropped, no store write |
//! | OrderingViolation | fatal | run aborted |
//! | Store | fatal | run aborted |
//!
//! An unmatched block completion is not an error at all; see
//! [`Disposition::Unmatched`](crate::Disposition::Unmatched).

use thiserror::Error;
use tracestate_core::{FieldError, Quark, StoreError, Timestamp};

/// Errors raised while projecting one event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// Recognised event missing a required field or carrying a wrong type
    #[error("malformed '{event}' event: {source}")]
    Malformed {
        /// Event name
        event: String,
        /// Field access failure
        #[source]
        source: FieldError,
    },

    /// In-place update on an attribute with no open interval
    #[error("'{event}' event updates attribute {quark} which has no ongoing interval")]
    MutateWithoutOpen {
        /// Event name
        event: String,
        /// Attribute targeted
        quark: Quark,
    },

    /// Event older than the last one seen for its host, or older than the
    /// history of a host-independent attribute (BFD, OAM) it writes
    #[error("out-of-order event on host '{host}': {ts} after {last}")]
    OrderingViolation {
        /// Host whose event was rejected
        host: String,
        /// Latest timestamp already projected for the host or attribute
        last: Timestamp,
        /// Offending timestamp
        ts: Timestamp,
    },

    /// Store rejected a write for a reason other than a missing interval
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ProjectionError {
    /// True when the run cannot continue
    ///
    /// Recoverable errors skip the event; fatal ones abort the run because
    /// the interval invariant can no longer be guaranteed.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ProjectionError::OrderingViolation { .. } | ProjectionError::Store(_)
        )
    }
}

/// Result type for projection operations
pub type Result<T> = std::result::Result<T, ProjectionError>;

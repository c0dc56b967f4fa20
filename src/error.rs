//! Unified error types for tracestate.
//!
//! This module provides a clean error type that wraps the errors of the
//! member crates and presents a consistent interface to users.

use thiserror::Error;
use tracestate_core::{StoreError, Timestamp};
use tracestate_engine::{ConfigError, ProjectionError};

/// All tracestate errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Event older than its host stream or a shared attribute; the run was aborted
    #[error("ordering violation on host '{host}': event at {ts} after {last}")]
    OrderingViolation {
        /// Offending host
        host: String,
        /// Latest accepted timestamp for the host
        last: Timestamp,
        /// Rejected timestamp
        ts: Timestamp,
    },

    /// Projection error other than an ordering violation
    #[error("projection error: {0}")]
    Projection(ProjectionError),

    /// Attribute store rejected an operation
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input could not be decoded into events
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for tracestate operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is an ordering violation.
    pub fn is_ordering_violation(&self) -> bool {
        matches!(self, Error::OrderingViolation { .. })
    }
}

impl From<ProjectionError> for Error {
    fn from(e: ProjectionError) -> Self {
        match e {
            ProjectionError::OrderingViolation { host, last, ts } => {
                Error::OrderingViolation { host, last, ts }
            }
            ProjectionError::Store(err) => Error::Store(err),
            other => Error::Projection(other),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

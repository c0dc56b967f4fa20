//! Core types and traits for tracestate
//!
//! This crate defines the foundational types used throughout the system:
//! - Timestamp: nanosecond event time
//! - Quark: opaque handle of an attribute path
//! - AttributePath: hierarchical key of one value history
//! - StateValue: value held by an attribute over an interval
//! - Interval: a closed-off `[start, end)` slice of a history
//! - Event / FieldValue: typed trace events as delivered by a reader
//! - Error: store and field error types
//! - Traits: the AttributeStore contract implemented by backends

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod event;
pub mod interval;
pub mod traits;
pub mod types;
pub mod value;

pub use error::{FieldError, StoreError, StoreResult};
pub use event::{Event, FieldValue};
pub use interval::Interval;
pub use traits::AttributeStore;
pub use types::{AttributePath, Quark, Timestamp};
pub use value::StateValue;

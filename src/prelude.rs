//! Convenient imports for tracestate.
//!
//! ```ignore
//! use tracestate::prelude::*;
//!
//! let mut analysis = Analysis::new();
//! analysis.run(events)?;
//! ```

// Main entry point
pub use crate::analysis::{Analysis, AnalysisBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use tracestate_core::{
    AttributePath, AttributeStore, Event, FieldValue, Interval, Quark, StateValue, Timestamp,
};

// Engine types
pub use tracestate_engine::{
    Disposition, Family, PendingSectorRequest, ProjectionConfig, RunSummary,
};

// Storage
pub use tracestate_storage::HistoryStore;

//! Event classification and state projection
//!
//! This crate turns an ordered stream of typed trace events into interval
//! writes on an [`AttributeStore`](tracestate_core::AttributeStore):
//! - Projection: per-event dispatcher and run loop
//! - Classifiers: one per event family, event fields → action
//! - PathResolver: identifying keys → attribute path → quark
//! - EntityRegistry: per-host bookkeeping (block request correlation)
//! - ProjectionConfig: family switches, id padding, end-of-stream policy
//!
//! Processing is single-threaded and synchronous: one event is fully
//! applied before the next is looked at.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod run;

pub use classify::{Action, BfdState, EventKind, Family, MessageTag, WriteOp};
pub use config::{ConfigError, Families, ProjectionConfig};
pub use dispatch::{Disposition, Projection};
pub use error::{ProjectionError, Result};
pub use registry::{DiskTable, EntityRegistry, HostEntry, PendingSectorRequest};
pub use resolver::PathResolver;
pub use run::RunSummary;

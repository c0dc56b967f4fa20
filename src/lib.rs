//! # Tracestate
//!
//! Projects ordered trace event streams into a hierarchical, time-indexed
//! attribute history: for every attribute path ever written, "what was its
//! value at time T" is a logarithmic lookup.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tracestate::prelude::*;
//!
//! let mut analysis = Analysis::builder().config_file("tracestate.toml")?.build()?;
//! analysis.run(events)?;
//!
//! for (path, value) in analysis.store().state_at(Timestamp::from_nanos(1_000)) {
//!     println!("{} = {}", path, value);
//! }
//! ```
//!
//! ## Event Families
//!
//! - Work-queue process lifecycle → `[host, pid, tid, "status"]`
//! - Zipkin message lifecycle → `[host, pid, "msg", "status"]`
//! - BFD session state → `["bfd_fsm_sid", sid, "status"]`
//! - OAM protection group state → `["hal_oam_prot_group", id, "status"]`
//! - Block I/O request correlation (per-host registry only)

#![warn(missing_docs)]

mod analysis;
mod error;

pub mod prelude;

// Re-export main entry points
pub use analysis::{Analysis, AnalysisBuilder, ANALYSIS_ID, VERSION};
pub use error::{Error, Result};

// Re-export member crates
pub use tracestate_engine as engine;
pub use tracestate_storage as storage;

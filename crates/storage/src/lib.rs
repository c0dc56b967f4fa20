//! Storage layer for tracestate
//!
//! This crate implements the in-memory attribute history backend:
//! - AttributeTree: path → quark allocation with get-or-create semantics
//! - History: per-attribute committed intervals plus the ongoing one
//! - HistoryStore: the `AttributeStore` implementation and its query side

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod history;
pub mod store;
pub mod tree;

pub use history::History;
pub use store::{HistoryStore, StoreStats};
pub use tree::AttributeTree;

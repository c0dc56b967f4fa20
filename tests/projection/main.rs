//! Projection Integration Tests
//!
//! End-to-end event streams through `Analysis`, one module per event family.

#[path = "common/mod.rs"]
mod common;

mod block_io;
mod fsm;
mod messages;
mod ordering;
mod process;

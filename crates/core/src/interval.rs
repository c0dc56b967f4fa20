//! Committed history intervals

use crate::types::Timestamp;
use crate::value::StateValue;
use serde::{Deserialize, Serialize};

/// A closed-off slice of one attribute's history
///
/// Covers the half-open range `[start, end)`. `end >= start` always holds;
/// `end == start` happens when two writes share a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// First instant covered
    pub start: Timestamp,
    /// First instant no longer covered
    pub end: Timestamp,
    /// Value held over the range
    pub value: StateValue,
}

impl Interval {
    /// Create an interval
    pub fn new(start: Timestamp, end: Timestamp, value: StateValue) -> Self {
        debug_assert!(end >= start, "interval ends before it starts");
        Self { start, end, value }
    }

    /// True if `ts` falls inside `[start, end)`
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start <= ts && ts < self.end
    }

    /// Length in nanoseconds
    pub fn duration(&self) -> i64 {
        self.end.since(self.start)
    }
}

//! The attribute store contract
//!
//! The projection engine writes through this trait and never sees how
//! histories are persisted. A backend owns two things: the attribute tree
//! (path → quark, created on first reference) and, per quark, a history of
//! contiguous, non-overlapping intervals with at most one interval open.

use crate::error::StoreResult;
use crate::interval::Interval;
use crate::types::{AttributePath, Quark, Timestamp};
use crate::value::StateValue;

/// Backend that accumulates per-attribute interval histories
///
/// # Write Semantics
///
/// | Operation | Effect |
/// |-----------|--------|
/// | `open` | Close the ongoing interval at `ts` (if any), start a new one with `value` at `ts` |
/// | `mutate_ongoing` | Replace the ongoing value, keeping its start; fails if nothing is open |
/// | `close` | Close the ongoing interval at `ts`; the attribute is absent until the next `open` |
/// | `close_all` | `close` every attribute that still has an ongoing interval |
///
/// Writes earlier than the ongoing interval's start (or, with nothing open,
/// the end of the last committed interval) are rejected with
/// [`StoreError::TimeOrdering`](crate::StoreError::TimeOrdering).
pub trait AttributeStore {
    /// Get or create the child `name` of `parent`
    ///
    /// Idempotent: the same `(parent, name)` always yields the same quark.
    fn child(&mut self, parent: Quark, name: &str) -> StoreResult<Quark>;

    /// Get or create the quark of a full path, starting from [`Quark::ROOT`]
    fn resolve_path(&mut self, path: &AttributePath) -> StoreResult<Quark> {
        path.segments()
            .iter()
            .try_fold(Quark::ROOT, |parent, segment| self.child(parent, segment))
    }

    /// Start a new interval holding `value` at `ts`
    ///
    /// Passing [`StateValue::Null`] behaves like [`close`](Self::close).
    fn open(&mut self, quark: Quark, value: StateValue, ts: Timestamp) -> StoreResult<()>;

    /// Replace the value of the ongoing interval in place
    fn mutate_ongoing(&mut self, quark: Quark, value: StateValue) -> StoreResult<()>;

    /// Close the ongoing interval at `ts`
    ///
    /// Returns the committed interval, or `None` if nothing was open.
    fn close(&mut self, quark: Quark, ts: Timestamp) -> StoreResult<Option<Interval>>;

    /// Close every ongoing interval at `ts`, finalising the history
    ///
    /// Returns the number of intervals closed.
    fn close_all(&mut self, ts: Timestamp) -> usize;
}

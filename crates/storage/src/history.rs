//! Per-attribute interval history
//!
//! Committed intervals are appended in time order and never touched again;
//! at most one ongoing interval sits after them. Because writes arrive in
//! non-decreasing time, the committed list stays sorted by both start and
//! end, which is what makes point queries a binary search.

use tracestate_core::{Interval, Quark, StateValue, StoreError, StoreResult, Timestamp};

/// Open interval: start time and current value
#[derive(Debug, Clone, PartialEq, Eq)]
struct Ongoing {
    start: Timestamp,
    value: StateValue,
}

/// History of one attribute
#[derive(Debug, Clone, Default)]
pub struct History {
    committed: Vec<Interval>,
    ongoing: Option<Ongoing>,
}

impl History {
    /// Create an empty history (absent from the beginning of time)
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed intervals in time order
    pub fn intervals(&self) -> &[Interval] {
        &self.committed
    }

    /// Start and value of the ongoing interval
    pub fn ongoing(&self) -> Option<(Timestamp, &StateValue)> {
        self.ongoing.as_ref().map(|o| (o.start, &o.value))
    }

    /// True when neither committed nor ongoing data exists
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty() && self.ongoing.is_none()
    }

    /// Earliest time a write may carry: the ongoing start, else the last end
    fn horizon(&self) -> Option<Timestamp> {
        match &self.ongoing {
            Some(o) => Some(o.start),
            None => self.committed.last().map(|iv| iv.end),
        }
    }

    fn check_order(&self, quark: Quark, ts: Timestamp) -> StoreResult<()> {
        match self.horizon() {
            Some(start) if ts < start => Err(StoreError::TimeOrdering { quark, start, ts }),
            _ => Ok(()),
        }
    }

    /// Close whatever is open at `ts` and start `value` at `ts`
    ///
    /// A null `value` only closes.
    pub fn open(&mut self, quark: Quark, value: StateValue, ts: Timestamp) -> StoreResult<()> {
        if value.is_null() {
            return self.close(quark, ts).map(|_| ());
        }
        self.check_order(quark, ts)?;
        self.commit(ts);
        self.ongoing = Some(Ongoing { start: ts, value });
        Ok(())
    }

    /// Replace the ongoing value without moving its start
    pub fn mutate_ongoing(&mut self, quark: Quark, value: StateValue) -> StoreResult<()> {
        match self.ongoing.as_mut() {
            Some(o) => {
                o.value = value;
                Ok(())
            }
            None => Err(StoreError::NoOngoingInterval { quark }),
        }
    }

    /// Close the ongoing interval at `ts`
    ///
    /// With nothing open this is a no-op, whatever `ts` is.
    pub fn close(&mut self, quark: Quark, ts: Timestamp) -> StoreResult<Option<Interval>> {
        if self.ongoing.is_none() {
            return Ok(None);
        }
        self.check_order(quark, ts)?;
        Ok(self.commit(ts))
    }

    fn commit(&mut self, end: Timestamp) -> Option<Interval> {
        let ongoing = self.ongoing.take()?;
        let interval = Interval::new(ongoing.start, end, ongoing.value);
        self.committed.push(interval.clone());
        Some(interval)
    }

    /// Value held at `ts`, `None` when absent
    ///
    /// # Performance
    ///
    /// O(log n) over committed intervals.
    pub fn query(&self, ts: Timestamp) -> Option<&StateValue> {
        if let Some(o) = &self.ongoing {
            if ts >= o.start {
                return Some(&o.value);
            }
        }
        let idx = self.committed.partition_point(|iv| iv.end <= ts);
        self.committed
            .get(idx)
            .filter(|iv| iv.contains(ts))
            .map(|iv| &iv.value)
    }
}

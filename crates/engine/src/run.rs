//! Run loop
//!
//! Feeds a whole event stream through a [`Projection`]. Iterator exhaustion
//! is end-of-stream; the first fatal error aborts the run. Cancellation is
//! checked between events, never inside one.

use crate::dispatch::{Disposition, Projection};
use crate::error::Result;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracestate_core::{AttributeStore, Event, Timestamp};
use tracing::info;

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Events dispatched
    pub events: u64,
    /// Interval writes applied
    pub projected: u64,
    /// Registry-only updates (block insert and matched completion)
    pub bookkept: u64,
    /// Events that required nothing
    pub ignored: u64,
    /// Events dropped on a recoverable error
    pub malformed: u64,
    /// Block completions without a pending insertion
    pub unmatched_completions: u64,
    /// Latest timestamp accepted
    pub last_timestamp: Option<Timestamp>,
    /// Intervals closed when the stream ended
    pub closed_at_end: u64,
    /// Run stopped by the cancel flag
    pub cancelled: bool,
}

impl RunSummary {
    pub(crate) fn record(&mut self, ts: Timestamp, outcome: &Result<Disposition>) {
        self.events += 1;
        let disposition = match outcome {
            Ok(disposition) => disposition,
            Err(_) => return,
        };
        self.last_timestamp = Some(self.last_timestamp.map_or(ts, |last| last.max(ts)));
        match disposition {
            Disposition::Written { .. } => self.projected += 1,
            Disposition::Inserted | Disposition::Completed(_) => self.bookkept += 1,
            Disposition::Unmatched => self.unmatched_completions += 1,
            Disposition::Ignored => self.ignored += 1,
            Disposition::Skipped(_) => self.malformed += 1,
        }
    }
}

impl<S: AttributeStore> Projection<S> {
    /// Project every event of `events`, then finalise
    ///
    /// Stops at the first fatal error, leaving the store as it was after
    /// the last good event.
    pub fn run<I>(&mut self, events: I) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Event>,
    {
        self.run_cancellable(events, &AtomicBool::new(false))
    }

    /// Like [`run`](Self::run), checking `cancel` before each event
    ///
    /// A cancelled run is not finalised: ongoing intervals stay open.
    pub fn run_cancellable<I>(&mut self, events: I, cancel: &AtomicBool) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Event>,
    {
        for event in events {
            if cancel.load(Ordering::Relaxed) {
                self.summary.cancelled = true;
                info!(events = self.summary.events, "projection cancelled");
                return Ok(self.summary.clone());
            }
            self.dispatch(&event)?;
        }
        self.finish();
        Ok(self.summary.clone())
    }

    /// End-of-stream handling: close every ongoing interval if configured
    pub fn finish(&mut self) {
        if self.config.close_at_end {
            if let Some(last) = self.summary.last_timestamp {
                self.summary.closed_at_end += self.store.close_all(last) as u64;
            }
        }
        let s = &self.summary;
        info!(
            events = s.events,
            projected = s.projected,
            bookkept = s.bookkept,
            ignored = s.ignored,
            malformed = s.malformed,
            unmatched = s.unmatched_completions,
            closed_at_end = s.closed_at_end,
            "projection finished"
        );
    }
}

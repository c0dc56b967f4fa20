//! In-memory attribute history store
//!
//! `HistoryStore` is the reference [`AttributeStore`] backend: an attribute
//! tree plus one [`History`] per quark. It keeps everything in memory for
//! the duration of an analysis and serves point queries afterwards.
//!
//! # Design
//!
//! - Quarks are dense indices, so histories live in a `Vec` slot per quark
//! - Writes validate the quark and time order before touching a history
//! - Queries never allocate quarks
//!
//! # Example
//!
//! ```
//! use tracestate_core::{AttributePath, AttributeStore, StateValue, Timestamp};
//! use tracestate_storage::HistoryStore;
//!
//! let mut store = HistoryStore::new();
//! let path = AttributePath::from(&["node-1", "42", "7", "status"][..]);
//! let quark = store.resolve_path(&path).unwrap();
//!
//! store.open(quark, StateValue::Int(1), Timestamp::from_nanos(100)).unwrap();
//! store.close(quark, Timestamp::from_nanos(200)).unwrap();
//!
//! assert_eq!(store.query_path(&path, Timestamp::from_nanos(150)), Some(StateValue::Int(1)));
//! assert_eq!(store.query_path(&path, Timestamp::from_nanos(200)), None);
//! ```

use crate::history::History;
use crate::tree::AttributeTree;
use serde::Serialize;
use tracestate_core::{
    AttributePath, AttributeStore, Interval, Quark, StateValue, StoreError, StoreResult,
    Timestamp,
};
use tracing::debug;

/// Write counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// `open` calls with a non-null value
    pub opens: u64,
    /// Successful `mutate_ongoing` calls
    pub mutations: u64,
    /// Intervals committed
    pub commits: u64,
}

/// In-memory [`AttributeStore`]
#[derive(Debug)]
pub struct HistoryStore {
    tree: AttributeTree,
    histories: Vec<History>,
    stats: StoreStats,
}

impl HistoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            tree: AttributeTree::new(),
            histories: vec![History::new()],
            stats: StoreStats::default(),
        }
    }

    fn history_mut(&mut self, quark: Quark) -> StoreResult<&mut History> {
        self.histories
            .get_mut(quark.index())
            .ok_or(StoreError::UnknownQuark(quark))
    }

    // ========================================================================
    // Attribute tree
    // ========================================================================

    /// Number of quarks allocated, root included
    pub fn quark_count(&self) -> usize {
        self.tree.len()
    }

    /// Look up a path without creating it
    pub fn find(&self, path: &AttributePath) -> Option<Quark> {
        self.tree.find(path)
    }

    /// Full path of `quark`
    pub fn path_of(&self, quark: Quark) -> Option<AttributePath> {
        self.tree.path_of(quark)
    }

    /// Parent of `quark`
    pub fn parent(&self, quark: Quark) -> Option<Quark> {
        self.tree.parent(quark)
    }

    /// Children of `quark`, sorted by name
    pub fn children(&self, quark: Quark) -> Vec<(String, Quark)> {
        self.tree.children(quark)
    }

    /// Every quark that carries history, with its path
    pub fn attributes(&self) -> impl Iterator<Item = (Quark, AttributePath)> + '_ {
        self.histories
            .iter()
            .enumerate()
            .filter(|(_, history)| !history.is_empty())
            .filter_map(move |(idx, _)| {
                let quark = Quark::from_index(idx)?;
                self.tree.path_of(quark).map(|path| (quark, path))
            })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Committed intervals of `quark` in time order
    pub fn intervals(&self, quark: Quark) -> &[Interval] {
        self.histories
            .get(quark.index())
            .map(History::intervals)
            .unwrap_or(&[])
    }

    /// Start and value of the ongoing interval of `quark`
    pub fn ongoing(&self, quark: Quark) -> Option<(Timestamp, &StateValue)> {
        self.histories.get(quark.index()).and_then(History::ongoing)
    }

    /// Value of `quark` at `ts`, `None` when absent
    pub fn query(&self, quark: Quark, ts: Timestamp) -> Option<StateValue> {
        self.histories
            .get(quark.index())
            .and_then(|history| history.query(ts))
            .cloned()
    }

    /// Value of `path` at `ts`, `None` when absent or never written
    pub fn query_path(&self, path: &AttributePath, ts: Timestamp) -> Option<StateValue> {
        self.find(path).and_then(|quark| self.query(quark, ts))
    }

    /// Every attribute holding a value at `ts`, sorted by path
    pub fn state_at(&self, ts: Timestamp) -> Vec<(AttributePath, StateValue)> {
        let mut state: Vec<(AttributePath, StateValue)> = self
            .attributes()
            .filter_map(|(quark, path)| self.query(quark, ts).map(|value| (path, value)))
            .collect();
        state.sort_by(|a, b| a.0.cmp(&b.0));
        state
    }

    /// Write counters
    pub fn stats(&self) -> StoreStats {
        self.stats
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeStore for HistoryStore {
    fn child(&mut self, parent: Quark, name: &str) -> StoreResult<Quark> {
        let quark = self.tree.child(parent, name)?;
        if quark.index() >= self.histories.len() {
            self.histories.resize_with(quark.index() + 1, History::new);
        }
        Ok(quark)
    }

    fn open(&mut self, quark: Quark, value: StateValue, ts: Timestamp) -> StoreResult<()> {
        let opening = !value.is_null();
        let history = self.history_mut(quark)?;
        let had_ongoing = history.ongoing().is_some();
        history.open(quark, value, ts)?;
        if had_ongoing {
            self.stats.commits += 1;
        }
        if opening {
            self.stats.opens += 1;
        }
        Ok(())
    }

    fn mutate_ongoing(&mut self, quark: Quark, value: StateValue) -> StoreResult<()> {
        self.history_mut(quark)?.mutate_ongoing(quark, value)?;
        self.stats.mutations += 1;
        Ok(())
    }

    fn close(&mut self, quark: Quark, ts: Timestamp) -> StoreResult<Option<Interval>> {
        let closed = self.history_mut(quark)?.close(quark, ts)?;
        if closed.is_some() {
            self.stats.commits += 1;
        }
        Ok(closed)
    }

    /// Close every ongoing interval at `ts`
    ///
    /// Intervals that started after `ts` are closed at their own start so
    /// the history stays well-formed. Returns the number closed.
    fn close_all(&mut self, ts: Timestamp) -> usize {
        let mut closed = 0;
        for (idx, history) in self.histories.iter_mut().enumerate() {
            let end = match history.ongoing() {
                Some((start, _)) => start.max(ts),
                None => continue,
            };
            let Some(quark) = Quark::from_index(idx) else {
                continue;
            };
            if let Ok(Some(_)) = history.close(quark, end) {
                closed += 1;
            }
        }
        self.stats.commits += closed as u64;
        debug!(closed, at = %ts, "closed ongoing intervals");
        closed
    }
}

//! Core identifier types
//!
//! This module defines the fundamental types used throughout the system:
//! - [`Timestamp`]: Nanosecond event time
//! - [`Quark`]: Opaque handle for an attribute path
//! - [`AttributePath`]: Hierarchical key identifying one value history

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Event time in nanoseconds
///
/// Timestamps are only compared within one host's stream; no clock
/// translation happens across hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Smallest representable timestamp
    pub const MIN: Timestamp = Timestamp(i64::MIN);

    /// Create a timestamp from nanoseconds
    ///
    /// # Examples
    ///
    /// ```
    /// use tracestate_core::Timestamp;
    ///
    /// let ts = Timestamp::from_nanos(1_500);
    /// assert_eq!(ts.as_nanos(), 1_500);
    /// ```
    pub const fn from_nanos(nanos: i64) -> Self {
        Timestamp(nanos)
    }

    /// Get the raw nanosecond value
    pub const fn as_nanos(&self) -> i64 {
        self.0
    }

    /// Nanoseconds elapsed since `earlier` (saturating)
    pub fn since(&self, earlier: Timestamp) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl From<i64> for Timestamp {
    fn from(nanos: i64) -> Self {
        Timestamp(nanos)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.0)
    }
}

/// Opaque handle of an attribute path
///
/// Quarks are allocated by the attribute store on first reference to a
/// path and stay stable for the lifetime of that store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quark(u32);

impl Quark {
    /// Handle of the empty path, parent of every top-level attribute
    pub const ROOT: Quark = Quark(0);

    /// Wrap a raw index
    pub const fn new(index: u32) -> Self {
        Quark(index)
    }

    /// Quark for a dense-table slot, `None` past `u32::MAX`
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Quark)
    }

    /// Raw index, usable as a slot in a dense table
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Quark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hierarchical attribute key
///
/// An ordered sequence of string segments, e.g. `[host, pid, tid, "status"]`.
/// Most paths in a trace projection have four segments or fewer, so the
/// segments are kept inline.
///
/// # Examples
///
/// ```
/// use tracestate_core::AttributePath;
///
/// let path = AttributePath::root("node-1").child("42").child("status");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), "node-1/42/status");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributePath {
    segments: SmallVec<[String; 4]>,
}

impl AttributePath {
    /// Empty path (the store root)
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-segment path
    pub fn root(segment: impl Into<String>) -> Self {
        let mut path = Self::new();
        path.push(segment);
        path
    }

    /// Append a segment in place
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Return a new path extended with `segment`
    pub fn child(mut self, segment: impl Into<String>) -> Self {
        self.push(segment);
        self
    }

    /// Path without its last segment, `None` for the empty path
    pub fn parent(&self) -> Option<AttributePath> {
        if self.segments.is_empty() {
            return None;
        }
        let mut parent = self.clone();
        parent.segments.pop();
        Some(parent)
    }

    /// Segments in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the empty path
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if `self` equals `other` or lies beneath it
    pub fn starts_with(&self, other: &AttributePath) -> bool {
        self.segments.starts_with(&other.segments)
    }
}

impl<S: Into<String>> FromIterator<S> for AttributePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&[&str]> for AttributePath {
    fn from(segments: &[&str]) -> Self {
        segments.iter().copied().collect()
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

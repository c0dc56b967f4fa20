//! Path resolver
//!
//! Turns identifying keys (host, pid, tid, session id, ...) into canonical
//! attribute paths and those paths into store quarks. Resolved prefixes are
//! cached, so `[a, b, c]` after `[a, b]` only asks the store for `c`.

use rustc_hash::FxHashMap;
use tracestate_core::{AttributePath, AttributeStore, Quark, StoreResult};

/// Leaf segment of every projected status attribute
pub const STATUS: &str = "status";
/// Segment grouping a process's message lifecycle
pub const MSG: &str = "msg";
/// Root segment of BFD session attributes
pub const BFD_ROOT: &str = "bfd_fsm_sid";
/// Root segment of OAM protection group attributes
pub const OAM_ROOT: &str = "hal_oam_prot_group";

/// `[host, pid, tid, "status"]`
pub fn process_status(host: &str, pid: i64, tid: i64) -> AttributePath {
    AttributePath::root(host)
        .child(pid.to_string())
        .child(tid.to_string())
        .child(STATUS)
}

/// `[host, pid, "msg", "status"]`
pub fn message_status(host: &str, pid: i64) -> AttributePath {
    AttributePath::root(host)
        .child(pid.to_string())
        .child(MSG)
        .child(STATUS)
}

/// `["bfd_fsm_sid", padded(sid), "status"]`
pub fn bfd_status(sid: i64, padding: usize) -> AttributePath {
    AttributePath::root(BFD_ROOT)
        .child(padded(sid, padding))
        .child(STATUS)
}

/// `["hal_oam_prot_group", padded(prot_id), "status"]`
pub fn oam_status(prot_id: i64, padding: usize) -> AttributePath {
    AttributePath::root(OAM_ROOT)
        .child(padded(prot_id, padding))
        .child(STATUS)
}

/// Decimal rendering zero-padded to `width` digits
pub fn padded(id: i64, width: usize) -> String {
    format!("{:0width$}", id, width = width)
}

/// Caching path → quark resolver
///
/// The cache belongs to one store; resolving against a different store
/// than the one that filled it yields meaningless quarks.
#[derive(Debug, Default)]
pub struct PathResolver {
    cache: FxHashMap<AttributePath, Quark>,
}

impl PathResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached paths
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Get or create the quark of `path`
    ///
    /// Idempotent. Walks back to the longest cached prefix and only asks
    /// the store for the remaining segments.
    pub fn resolve<S: AttributeStore + ?Sized>(
        &mut self,
        store: &mut S,
        path: &AttributePath,
    ) -> StoreResult<Quark> {
        if let Some(&quark) = self.cache.get(path) {
            return Ok(quark);
        }

        let segments = path.segments();
        let mut known = 0;
        let mut quark = Quark::ROOT;
        let mut prefix = path.clone();
        while let Some(parent) = prefix.parent() {
            if parent.is_empty() {
                break;
            }
            if let Some(&cached) = self.cache.get(&parent) {
                known = parent.len();
                quark = cached;
                break;
            }
            prefix = parent;
        }

        let mut current: AttributePath = segments[..known].iter().cloned().collect();
        for segment in &segments[known..] {
            quark = store.child(quark, segment)?;
            current.push(segment.clone());
            self.cache.insert(current.clone(), quark);
        }
        Ok(quark)
    }
}

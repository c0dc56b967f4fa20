//! Entity registry
//!
//! In-memory, per-run bookkeeping of live entities keyed by host. It holds
//! whatever the projection needs to correlate events that share no explicit
//! link, such as a block request completion and the insertion it finishes,
//! which only share their `(device, sector)` pair.
//!
//! Entries are never evicted. Cardinality is bounded by distinct hosts and
//! by the `(device, sector)` pairs seen, not by event count.

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracestate_core::Timestamp;

/// A block request between insertion and completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingSectorRequest {
    /// First sector of the request
    pub sector: i64,
    /// Number of sectors
    pub nr_sector: i64,
    /// Thread that inserted the request
    pub tid: i64,
    /// Insertion time
    pub start_ts: Timestamp,
    /// Completion time, set once finalised
    pub end_ts: Option<Timestamp>,
}

impl PendingSectorRequest {
    /// True once a completion has been matched
    pub fn is_finalized(&self) -> bool {
        self.end_ts.is_some()
    }

    /// Nanoseconds between insertion and completion
    pub fn latency(&self) -> Option<i64> {
        self.end_ts.map(|end| end.since(self.start_ts))
    }
}

/// Requests per device, keyed by sector
#[derive(Debug, Default)]
pub struct DiskTable {
    devices: FxHashMap<i64, FxHashMap<i64, PendingSectorRequest>>,
}

impl DiskTable {
    /// Record an insertion; a later insert on the same sector wins
    pub fn record_insert(&mut self, dev: i64, request: PendingSectorRequest) {
        self.devices
            .entry(dev)
            .or_default()
            .insert(request.sector, request);
    }

    /// Finalise the pending request on `(dev, sector)`
    ///
    /// Returns the finalised entry, or `None` when nothing is pending there
    /// (never inserted, or already completed).
    pub fn record_complete(
        &mut self,
        dev: i64,
        sector: i64,
        ts: Timestamp,
    ) -> Option<PendingSectorRequest> {
        let request = self.devices.get_mut(&dev)?.get_mut(&sector)?;
        if request.is_finalized() {
            return None;
        }
        request.end_ts = Some(ts);
        Some(request.clone())
    }

    /// Look up the request on `(dev, sector)`
    pub fn get(&self, dev: i64, sector: i64) -> Option<&PendingSectorRequest> {
        self.devices.get(&dev).and_then(|sectors| sectors.get(&sector))
    }

    /// Number of devices seen
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Requests still waiting for a completion
    pub fn pending_count(&self) -> usize {
        self.devices
            .values()
            .flat_map(|sectors| sectors.values())
            .filter(|request| !request.is_finalized())
            .count()
    }

    /// Remove and return finalised requests, per device
    pub fn drain_completed(&mut self) -> Vec<(i64, PendingSectorRequest)> {
        let mut drained = Vec::new();
        for (&dev, sectors) in self.devices.iter_mut() {
            let done: Vec<i64> = sectors
                .iter()
                .filter(|(_, request)| request.is_finalized())
                .map(|(&sector, _)| sector)
                .collect();
            for sector in done {
                if let Some(request) = sectors.remove(&sector) {
                    drained.push((dev, request));
                }
            }
        }
        drained.sort_by_key(|(dev, request)| (request.start_ts, *dev, request.sector));
        drained
    }
}

/// Everything known about one traced host
#[derive(Debug)]
pub struct HostEntry {
    name: String,
    last_ts: Option<Timestamp>,
    /// Block request bookkeeping
    pub disks: DiskTable,
}

impl HostEntry {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            last_ts: None,
            disks: DiskTable::default(),
        }
    }

    /// Host name, the root segment of its attribute namespace
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latest event time accepted for this host
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.last_ts
    }

    /// Accept `ts` as the host's new latest time
    ///
    /// Returns the previous latest time as the error when `ts` goes
    /// backwards; the stored time is left unchanged in that case.
    pub fn advance(&mut self, ts: Timestamp) -> Result<(), Timestamp> {
        match self.last_ts {
            Some(last) if ts < last => Err(last),
            _ => {
                self.last_ts = Some(ts);
                Ok(())
            }
        }
    }
}

/// Per-run index of hosts
#[derive(Debug, Default)]
pub struct EntityRegistry {
    hosts: FxHashMap<String, HostEntry>,
}

impl EntityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for `name`, creating it on first reference
    pub fn get_or_create_host(&mut self, name: &str) -> &mut HostEntry {
        self.hosts
            .entry(name.to_string())
            .or_insert_with(|| HostEntry::new(name))
    }

    /// Look up a host without creating it
    pub fn host(&self, name: &str) -> Option<&HostEntry> {
        self.hosts.get(name)
    }

    /// Number of hosts seen
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    /// Host names, sorted
    pub fn host_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.hosts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Record a block request insertion on `host`
    pub fn record_insert(
        &mut self,
        host: &str,
        dev: i64,
        sector: i64,
        nr_sector: i64,
        tid: i64,
        ts: Timestamp,
    ) {
        self.get_or_create_host(host).disks.record_insert(
            dev,
            PendingSectorRequest {
                sector,
                nr_sector,
                tid,
                start_ts: ts,
                end_ts: None,
            },
        );
    }

    /// Match a block request completion on `host`
    pub fn record_complete(
        &mut self,
        host: &str,
        dev: i64,
        sector: i64,
        ts: Timestamp,
    ) -> Option<PendingSectorRequest> {
        self.hosts
            .get_mut(host)?
            .disks
            .record_complete(dev, sector, ts)
    }
}

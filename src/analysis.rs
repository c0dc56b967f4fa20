//! Main analysis entry point.
//!
//! An [`Analysis`] owns one projection over the in-memory history store.
//! Feed it a whole event stream with [`Analysis::run`], then query the
//! resulting histories through [`Analysis::store`].

use crate::error::{Error, Result};
use std::io::BufRead;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use tracestate_core::Event;
use tracestate_engine::{EntityRegistry, Family, Projection, ProjectionConfig, RunSummary};
use tracestate_storage::HistoryStore;
use tracing::debug;

/// Identifier of this analysis
pub const ANALYSIS_ID: &str = "tracestate.analysis.ceph-state";

/// Version of the attribute layout produced; bump when paths or status
/// encodings change so stored histories are rebuilt.
pub const VERSION: u32 = 1;

/// A state projection analysis.
///
/// # Example
///
/// ```
/// use tracestate::prelude::*;
///
/// let mut analysis = Analysis::new();
/// let events = vec![
///     Event::new("osd:opwq_process_start", 10, "node-1")
///         .with_field("vpid", FieldValue::Int(42))
///         .with_field("vtid", FieldValue::Int(7)),
///     Event::new("osd:opwq_process_finish", 20, "node-1")
///         .with_field("vpid", FieldValue::Int(42))
///         .with_field("vtid", FieldValue::Int(7)),
/// ];
/// analysis.run(events)?;
///
/// let path = AttributePath::from(&["node-1", "42", "7", "status"][..]);
/// assert_eq!(
///     analysis.store().query_path(&path, Timestamp::from_nanos(15)),
///     Some(StateValue::Int(1))
/// );
/// # Ok::<(), tracestate::Error>(())
/// ```
#[derive(Debug)]
pub struct Analysis {
    projection: Projection<HistoryStore>,
}

impl Analysis {
    /// Create an analysis with default settings.
    pub fn new() -> Self {
        Self::from_validated(ProjectionConfig::default())
    }

    /// Create an analysis with explicit settings.
    ///
    /// Fails with [`Error::Config`] when the settings do not validate.
    pub fn with_config(config: ProjectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: ProjectionConfig) -> Self {
        Self {
            projection: Projection::new(HistoryStore::new(), config),
        }
    }

    /// Create a builder for analysis configuration.
    pub fn builder() -> AnalysisBuilder {
        AnalysisBuilder::new()
    }

    /// Project a whole event stream.
    ///
    /// Returns the run counters, or the fatal error that aborted the run.
    pub fn run<I>(&mut self, events: I) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Event>,
    {
        Ok(self.projection.run(events)?)
    }

    /// Project a stream, stopping between events once `cancel` is set.
    pub fn run_cancellable<I>(&mut self, events: I, cancel: &AtomicBool) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Event>,
    {
        Ok(self.projection.run_cancellable(events, cancel)?)
    }

    /// Project a JSON-lines stream, one event object per line.
    ///
    /// Blank lines are skipped. A line that does not decode aborts the run
    /// with [`Error::Parse`] naming the line number.
    pub fn run_json_lines<R: BufRead>(&mut self, reader: R) -> Result<RunSummary> {
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let event: Event = serde_json::from_str(&line)
                .map_err(|e| Error::Parse(format!("line {}: {}", idx + 1, e)))?;
            self.projection.dispatch(&event)?;
        }
        self.projection.finish();
        Ok(self.projection.summary().clone())
    }

    /// The attribute histories built so far.
    pub fn store(&self) -> &HistoryStore {
        self.projection.store()
    }

    /// Per-host bookkeeping.
    pub fn registry(&self) -> &EntityRegistry {
        self.projection.registry()
    }

    /// Mutable per-host bookkeeping, e.g. to drain finalised block requests.
    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        self.projection.registry_mut()
    }

    /// Counters accumulated so far.
    pub fn summary(&self) -> &RunSummary {
        self.projection.summary()
    }

    /// Active configuration.
    pub fn config(&self) -> &ProjectionConfig {
        self.projection.config()
    }

    /// A new, empty analysis with the same configuration.
    pub fn fresh(&self) -> Self {
        Self {
            projection: self.projection.fresh(),
        }
    }

    /// Consume the analysis, keeping the histories.
    pub fn into_store(self) -> HistoryStore {
        self.projection.into_store()
    }
}

impl Default for Analysis {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for analysis configuration.
///
/// # Example
///
/// ```
/// use tracestate::prelude::*;
///
/// let analysis = Analysis::builder()
///     .disable(Family::BlockIo)
///     .id_padding(4)
///     .close_at_end(false)
///     .build()?;
/// assert_eq!(analysis.config().id_padding, 4);
/// # Ok::<(), tracestate::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnalysisBuilder {
    config: ProjectionConfig,
}

impl AnalysisBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ProjectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a TOML file.
    pub fn config_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.config = ProjectionConfig::from_file(path)?;
        Ok(self)
    }

    /// Stop projecting one event family.
    pub fn disable(mut self, family: Family) -> Self {
        self.config.families.set(family, false);
        self
    }

    /// Project one event family.
    pub fn enable(mut self, family: Family) -> Self {
        self.config.families.set(family, true);
        self
    }

    /// Zero-pad width of BFD and OAM ids.
    pub fn id_padding(mut self, width: usize) -> Self {
        self.config.id_padding = width;
        self
    }

    /// Whether ongoing intervals are closed when the stream ends.
    pub fn close_at_end(mut self, close: bool) -> Self {
        self.config.close_at_end = close;
        self
    }

    /// Validate the configuration and create the analysis.
    pub fn build(self) -> Result<Analysis> {
        debug!(config = ?self.config, "analysis configured");
        Analysis::with_config(self.config)
    }
}

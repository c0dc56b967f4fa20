//! Projection dispatcher
//!
//! The per-event entry point. For each event it:
//!
//! 1. gets or creates the host entry and checks the host's time order,
//! 2. decodes the event name (unknown or disabled names are a no-op),
//! 3. lets the family classifier build an action from the fields,
//! 4. applies the action to the store or the entity registry.
//!
//! Steps 1-3 never write to the store, so a malformed event leaves no
//! partial effect behind.

use crate::classify::{self, Action, EventKind, Family, WriteOp};
use crate::config::ProjectionConfig;
use crate::error::{ProjectionError, Result};
use crate::registry::{EntityRegistry, PendingSectorRequest};
use crate::resolver::PathResolver;
use crate::run::RunSummary;
use tracestate_core::{AttributeStore, Event, Quark, StoreError};
use tracing::{debug, error, warn};

/// Outcome of dispatching one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// An interval write was applied
    Written {
        /// Family that produced the write
        family: Family,
        /// Attribute written
        quark: Quark,
    },
    /// The entity registry recorded a block request insertion
    Inserted,
    /// A block request completion matched its insertion
    Completed(PendingSectorRequest),
    /// A block request completion had no pending insertion
    Unmatched,
    /// Unrecognised, disabled, or recognised but requiring nothing
    Ignored,
    /// Recoverable error; the event was dropped
    Skipped(ProjectionError),
}

/// Projects events into an [`AttributeStore`]
///
/// Owns the store, the entity registry and the path cache for one run.
///
/// # Example
///
/// ```
/// use tracestate_core::{AttributePath, Event, FieldValue, StateValue, Timestamp};
/// use tracestate_engine::{Projection, ProjectionConfig};
/// use tracestate_storage::HistoryStore;
///
/// let mut projection = Projection::new(HistoryStore::new(), ProjectionConfig::default());
/// let start = Event::new("osd:opwq_process_start", 100, "node-1")
///     .with_field("vpid", FieldValue::Int(42))
///     .with_field("vtid", FieldValue::Int(7));
/// projection.dispatch(&start).unwrap();
///
/// let path = AttributePath::from(&["node-1", "42", "7", "status"][..]);
/// let value = projection.store().query_path(&path, Timestamp::from_nanos(150));
/// assert_eq!(value, Some(StateValue::Int(1)));
/// ```
#[derive(Debug)]
pub struct Projection<S> {
    pub(crate) store: S,
    pub(crate) config: ProjectionConfig,
    pub(crate) registry: EntityRegistry,
    pub(crate) resolver: PathResolver,
    pub(crate) summary: RunSummary,
}

impl<S: AttributeStore> Projection<S> {
    /// Create a projection writing into `store`
    pub fn new(store: S, config: ProjectionConfig) -> Self {
        Self {
            store,
            config,
            registry: EntityRegistry::new(),
            resolver: PathResolver::new(),
            summary: RunSummary::default(),
        }
    }

    /// Project one event
    ///
    /// Recoverable problems come back as [`Disposition::Skipped`]; only
    /// fatal errors ([`ProjectionError::is_fatal`]) are returned as `Err`.
    pub fn dispatch(&mut self, event: &Event) -> Result<Disposition> {
        let outcome = self.project(event);
        self.summary.record(event.timestamp, &outcome);
        outcome
    }

    fn project(&mut self, event: &Event) -> Result<Disposition> {
        let host = self.registry.get_or_create_host(&event.host);
        if let Err(last) = host.advance(event.timestamp) {
            let err = ProjectionError::OrderingViolation {
                host: event.host.clone(),
                last,
                ts: event.timestamp,
            };
            error!(host = %event.host, last = %last, ts = %event.timestamp, "event stream went backwards");
            return Err(err);
        }

        let Some(kind) = EventKind::from_name(&event.name) else {
            debug!(event = %event.name, "unrecognised event");
            return Ok(Disposition::Ignored);
        };
        let family = kind.family();
        if !self.config.families.is_enabled(family) {
            return Ok(Disposition::Ignored);
        }

        let action = match classify::classify(kind, event, self.config.id_padding) {
            Ok(action) => action,
            Err(source) => {
                return Ok(self.skip(
                    event,
                    ProjectionError::Malformed {
                        event: event.name.clone(),
                        source,
                    },
                ))
            }
        };

        match action {
            Action::Write { path, op } => {
                let quark = self.resolver.resolve(&mut self.store, &path)?;
                match self.write(quark, op, event) {
                    Ok(()) => Ok(Disposition::Written { family, quark }),
                    Err(StoreError::NoOngoingInterval { quark }) => Ok(self.skip(
                        event,
                        ProjectionError::MutateWithoutOpen {
                            event: event.name.clone(),
                            quark,
                        },
                    )),
                    Err(StoreError::TimeOrdering { start, ts, .. }) => {
                        error!(
                            host = %event.host,
                            path = %path,
                            last = %start,
                            ts = %ts,
                            "write precedes attribute history"
                        );
                        Err(ProjectionError::OrderingViolation {
                            host: event.host.clone(),
                            last: start,
                            ts,
                        })
                    }
                    Err(err) => Err(err.into()),
                }
            }
            Action::BlockInsert {
                dev,
                sector,
                nr_sector,
                tid,
            } => {
                self.registry
                    .record_insert(&event.host, dev, sector, nr_sector, tid, event.timestamp);
                Ok(Disposition::Inserted)
            }
            Action::BlockComplete { dev, sector } => Ok(
                match self
                    .registry
                    .record_complete(&event.host, dev, sector, event.timestamp)
                {
                    Some(request) => Disposition::Completed(request),
                    None => Disposition::Unmatched,
                },
            ),
            Action::Ignore(reason) => {
                debug!(event = %event.name, reason, "nothing to project");
                Ok(Disposition::Ignored)
            }
        }
    }

    fn write(&mut self, quark: Quark, op: WriteOp, event: &Event) -> std::result::Result<(), StoreError> {
        match op {
            WriteOp::Open(value) => self.store.open(quark, value, event.timestamp),
            WriteOp::MutateOngoing(value) => self.store.mutate_ongoing(quark, value),
            WriteOp::Close => self.store.close(quark, event.timestamp).map(|_| ()),
        }
    }

    fn skip(&self, event: &Event, err: ProjectionError) -> Disposition {
        warn!(
            host = %event.host,
            event = %event.name,
            ts = %event.timestamp,
            error = %err,
            "skipping event"
        );
        Disposition::Skipped(err)
    }

    /// The store being written
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the projection, keeping the store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Per-host bookkeeping
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Mutable per-host bookkeeping, e.g. to drain finalised block requests
    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    /// Active configuration
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Counters accumulated so far
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }
}

impl<S: AttributeStore + Default> Projection<S> {
    /// A new projection with the same configuration over an empty store
    ///
    /// Used to rebuild state from scratch; nothing is shared with `self`.
    pub fn fresh(&self) -> Self {
        Self::new(S::default(), self.config.clone())
    }
}

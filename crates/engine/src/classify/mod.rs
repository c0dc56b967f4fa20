//! Event classifiers
//!
//! Event names are decoded once into a closed [`EventKind`], then the
//! matching family turns the event's fields into an [`Action`]. Every field
//! a family needs is read before the action is built, so a malformed event
//! yields an error and no partial action.
//!
//! | Family | Events | Attribute |
//! |--------|--------|-----------|
//! | Process | `opwq_process_start` / `opwq_process_finish` | `[host, pid, tid, "status"]` |
//! | BlockIo | `block_rq_insert` / `block_rq_complete` | none (registry only) |
//! | Messages | `zipkin:timestamp` | `[host, pid, "msg", "status"]` |
//! | Bfd | `bfd_fsm__state_change` | `["bfd_fsm_sid", sid, "status"]` |
//! | Oam | `hal__oam_prot_group` | `["hal_oam_prot_group", id, "status"]` |

mod block;
mod fsm;
mod messages;
mod process;

pub use fsm::BfdState;
pub use messages::MessageTag;

use serde::Serialize;
use tracestate_core::{AttributePath, Event, FieldError, StateValue};

/// Status values written by the classifiers
pub mod status {
    /// Work-queue thread processing an op
    pub const RUNNING: i64 = 1;
    /// Message queued for sending
    pub const ENQUEUED: i64 = 2;
    /// Message being written out
    pub const WRITING: i64 = 3;
    /// Reply received for the message
    pub const REPLIED: i64 = 4;
    /// BFD session initialising
    pub const BFD_INIT: i64 = 11;
    /// BFD session down
    pub const BFD_DOWN: i64 = 12;
    /// BFD session up
    pub const BFD_UP: i64 = 13;
}

/// Recognised event names
pub mod names {
    /// Work-queue op start, as emitted under the `osd` provider
    pub const PROCESS_START: &str = "osd:opwq_process_start";
    /// Work-queue op finish, as emitted under the `osd` provider
    pub const PROCESS_FINISH: &str = "osd:opwq_process_finish";
    /// Zipkin-style message lifecycle marker
    pub const ZIPKIN: &str = "zipkin:timestamp";
    /// Block request queued to a device
    pub const BLOCK_INSERT: &str = "block_rq_insert";
    /// Block request completed by a device
    pub const BLOCK_COMPLETE: &str = "block_rq_complete";
    /// BFD session state transition
    pub const BFD_STATE_CHANGE: &str = "bfd_fsm__state_change";
    /// OAM protection group state report
    pub const OAM_PROT_GROUP: &str = "hal__oam_prot_group";
}

/// Provider prefix the work-queue events may carry
const OSD_PROVIDER: &str = "osd:";

/// Event family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Family {
    /// Work-queue process lifecycle
    Process,
    /// Block I/O request lifecycle
    BlockIo,
    /// Zipkin message lifecycle
    Messages,
    /// BFD session state machine
    Bfd,
    /// OAM protection group state machine
    Oam,
}

impl Family {
    /// All families (for iteration)
    pub const ALL: [Family; 5] = [
        Family::Process,
        Family::BlockIo,
        Family::Messages,
        Family::Bfd,
        Family::Oam,
    ];

    /// Lowercase name, as used in configuration
    pub const fn as_str(self) -> &'static str {
        match self {
            Family::Process => "process",
            Family::BlockIo => "block_io",
            Family::Messages => "messages",
            Family::Bfd => "bfd",
            Family::Oam => "oam",
        }
    }
}

/// Decoded event name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Work-queue op start
    ProcessStart,
    /// Work-queue op finish
    ProcessFinish,
    /// Zipkin message marker, sub-dispatched on its `event` tag
    Zipkin,
    /// Block request insertion
    BlockInsert,
    /// Block request completion
    BlockComplete,
    /// BFD session transition
    BfdStateChange,
    /// OAM protection group report
    OamProtGroup,
}

impl EventKind {
    /// Decode an event name; `None` for names outside the vocabulary
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            names::ZIPKIN => EventKind::Zipkin,
            names::BLOCK_INSERT => EventKind::BlockInsert,
            names::BLOCK_COMPLETE => EventKind::BlockComplete,
            names::BFD_STATE_CHANGE => EventKind::BfdStateChange,
            names::OAM_PROT_GROUP => EventKind::OamProtGroup,
            other => match other.strip_prefix(OSD_PROVIDER).unwrap_or(other) {
                "opwq_process_start" => EventKind::ProcessStart,
                "opwq_process_finish" => EventKind::ProcessFinish,
                _ => return None,
            },
        };
        Some(kind)
    }

    /// Family this kind belongs to
    pub const fn family(self) -> Family {
        match self {
            EventKind::ProcessStart | EventKind::ProcessFinish => Family::Process,
            EventKind::Zipkin => Family::Messages,
            EventKind::BlockInsert | EventKind::BlockComplete => Family::BlockIo,
            EventKind::BfdStateChange => Family::Bfd,
            EventKind::OamProtGroup => Family::Oam,
        }
    }
}

/// Interval write requested by a classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Start a new interval at the event time
    Open(StateValue),
    /// Replace the ongoing value, keeping its start
    MutateOngoing(StateValue),
    /// End the ongoing interval at the event time
    Close,
}

/// What one event asks of the projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Write to the attribute at `path`
    Write {
        /// Target attribute
        path: AttributePath,
        /// Operation
        op: WriteOp,
    },
    /// Remember a block request insertion
    BlockInsert {
        /// Device id
        dev: i64,
        /// First sector
        sector: i64,
        /// Sector count
        nr_sector: i64,
        /// Inserting thread
        tid: i64,
    },
    /// Match a block request completion
    BlockComplete {
        /// Device id
        dev: i64,
        /// First sector
        sector: i64,
    },
    /// Recognised event that requires nothing
    Ignore(&'static str),
}

/// Turn a recognised event into an action
///
/// `id_padding` is the zero-pad width of BFD and OAM ids.
pub fn classify(kind: EventKind, event: &Event, id_padding: usize) -> Result<Action, FieldError> {
    match kind {
        EventKind::ProcessStart => process::start(event),
        EventKind::ProcessFinish => process::finish(event),
        EventKind::Zipkin => messages::classify(event),
        EventKind::BlockInsert => block::insert(event),
        EventKind::BlockComplete => block::complete(event),
        EventKind::BfdStateChange => fsm::bfd(event, id_padding),
        EventKind::OamProtGroup => fsm::oam(event, id_padding),
    }
}

//! Protocol state machines
//!
//! BFD session transitions map the `next_state` label onto a status code;
//! labels outside Init/Down/Up are dropped without touching the attribute.
//! OAM protection group reports always open a new interval holding
//! `cur_stat_id`, even when the value repeats.

use super::{status, Action, WriteOp};
use crate::resolver;
use tracestate_core::{Event, FieldError, StateValue};

const SID: &str = "sid_m";
const NEXT_STATE: &str = "next_state";
const PROT_ID: &str = "prot_id";
const CUR_STAT_ID: &str = "cur_stat_id";

/// BFD session states that are projected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BfdState {
    /// Session initialising
    Init,
    /// Session down
    Down,
    /// Session up
    Up,
}

impl BfdState {
    /// Case-insensitive label match
    pub fn from_label(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("init") {
            Some(BfdState::Init)
        } else if label.eq_ignore_ascii_case("down") {
            Some(BfdState::Down)
        } else if label.eq_ignore_ascii_case("up") {
            Some(BfdState::Up)
        } else {
            None
        }
    }

    /// Status code written to the session attribute
    pub const fn code(self) -> i64 {
        match self {
            BfdState::Init => status::BFD_INIT,
            BfdState::Down => status::BFD_DOWN,
            BfdState::Up => status::BFD_UP,
        }
    }
}

pub(super) fn bfd(event: &Event, id_padding: usize) -> Result<Action, FieldError> {
    let sid = event.int(SID)?;
    let label = event.label(NEXT_STATE)?;
    let Some(state) = BfdState::from_label(label) else {
        return Ok(Action::Ignore("unprojected bfd state"));
    };
    Ok(Action::Write {
        path: resolver::bfd_status(sid, id_padding),
        op: WriteOp::Open(StateValue::Int(state.code())),
    })
}

pub(super) fn oam(event: &Event, id_padding: usize) -> Result<Action, FieldError> {
    let prot_id = event.int(PROT_ID)?;
    let cur = event.int(CUR_STAT_ID)?;
    Ok(Action::Write {
        path: resolver::oam_status(prot_id, id_padding),
        op: WriteOp::Open(StateValue::Int(cur)),
    })
}

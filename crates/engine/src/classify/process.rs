//! Work-queue process lifecycle
//!
//! `opwq_process_start` opens RUNNING on the thread's status attribute and
//! `opwq_process_finish` closes it.

use super::{status, Action, WriteOp};
use crate::resolver;
use tracestate_core::{Event, FieldError, StateValue};

const VPID: &str = "vpid";
const VTID: &str = "vtid";

fn status_write(event: &Event, op: WriteOp) -> Result<Action, FieldError> {
    let pid = event.int(VPID)?;
    let tid = event.int(VTID)?;
    Ok(Action::Write {
        path: resolver::process_status(&event.host, pid, tid),
        op,
    })
}

pub(super) fn start(event: &Event) -> Result<Action, FieldError> {
    status_write(event, WriteOp::Open(StateValue::Int(status::RUNNING)))
}

pub(super) fn finish(event: &Event) -> Result<Action, FieldError> {
    status_write(event, WriteOp::Close)
}

//! Zipkin message lifecycle
//!
//! A `zipkin:timestamp` event carries its lifecycle step in the `event`
//! string field. Enqueue and write open new intervals, the OSD reply
//! rewrites the ongoing one without moving its start, and finish or
//! destruction close it. Unknown tags are ignored.

use super::{status, Action, WriteOp};
use crate::resolver;
use tracestate_core::{Event, FieldError, StateValue};

const VPID: &str = "vpid";
const TAG: &str = "event";

/// Lifecycle step carried by a `zipkin:timestamp` event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTag {
    /// "async enqueueing message"
    Enqueue,
    /// "async writing message"
    Write,
    /// "osd op reply"
    OsdReply,
    /// "finish"
    Finish,
    /// "message destructed"
    Destructed,
}

impl MessageTag {
    /// Decode the tag string; `None` for unknown steps
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "async enqueueing message" => Some(MessageTag::Enqueue),
            "async writing message" => Some(MessageTag::Write),
            "osd op reply" => Some(MessageTag::OsdReply),
            "finish" => Some(MessageTag::Finish),
            "message destructed" => Some(MessageTag::Destructed),
            _ => None,
        }
    }

    fn op(self) -> WriteOp {
        match self {
            MessageTag::Enqueue => WriteOp::Open(StateValue::Int(status::ENQUEUED)),
            MessageTag::Write => WriteOp::Open(StateValue::Int(status::WRITING)),
            MessageTag::OsdReply => WriteOp::MutateOngoing(StateValue::Int(status::REPLIED)),
            MessageTag::Finish | MessageTag::Destructed => WriteOp::Close,
        }
    }
}

pub(super) fn classify(event: &Event) -> Result<Action, FieldError> {
    let pid = event.int(VPID)?;
    let tag = event.string(TAG)?;
    let Some(tag) = MessageTag::from_tag(tag) else {
        return Ok(Action::Ignore("unknown zipkin tag"));
    };
    Ok(Action::Write {
        path: resolver::message_status(&event.host, pid),
        op: tag.op(),
    })
}

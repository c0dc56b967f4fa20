//! Shared event builders and assertions.

#![allow(dead_code)]

use tracestate::prelude::*;

pub fn ts(nanos: i64) -> Timestamp {
    Timestamp::from_nanos(nanos)
}

pub fn path(segments: &[&str]) -> AttributePath {
    AttributePath::from(segments)
}

pub fn process_start(t: i64, host: &str, pid: i64, tid: i64) -> Event {
    Event::new("osd:opwq_process_start", t, host)
        .with_field("vpid", FieldValue::Int(pid))
        .with_field("vtid", FieldValue::Int(tid))
}

pub fn process_finish(t: i64, host: &str, pid: i64, tid: i64) -> Event {
    Event::new("osd:opwq_process_finish", t, host)
        .with_field("vpid", FieldValue::Int(pid))
        .with_field("vtid", FieldValue::Int(tid))
}

pub fn zipkin(t: i64, host: &str, pid: i64, tag: &str) -> Event {
    Event::new("zipkin:timestamp", t, host)
        .with_field("vpid", FieldValue::Int(pid))
        .with_field("event", FieldValue::Str(tag.to_string()))
}

pub fn block_insert(t: i64, host: &str, dev: i64, sector: i64, nr_sector: i64, tid: i64) -> Event {
    Event::new("block_rq_insert", t, host)
        .with_field("dev", FieldValue::Int(dev))
        .with_field("sector", FieldValue::Int(sector))
        .with_field("nr_sector", FieldValue::Int(nr_sector))
        .with_field("tid", FieldValue::Int(tid))
}

pub fn block_complete(t: i64, host: &str, dev: i64, sector: i64) -> Event {
    Event::new("block_rq_complete", t, host)
        .with_field("dev", FieldValue::Int(dev))
        .with_field("sector", FieldValue::Int(sector))
}

pub fn bfd(t: i64, host: &str, sid: i64, state: &str) -> Event {
    Event::new("bfd_fsm__state_change", t, host)
        .with_field("sid_m", FieldValue::Int(sid))
        .with_field(
            "next_state",
            FieldValue::Enum {
                value: 0,
                label: state.to_string(),
            },
        )
}

pub fn oam(t: i64, host: &str, prot_id: i64, cur: i64) -> Event {
    Event::new("hal__oam_prot_group", t, host)
        .with_field("prot_id", FieldValue::Int(prot_id))
        .with_field("cur_stat_id", FieldValue::Int(cur))
}

/// Committed intervals of `segments` as `(start, end, value)` triples
pub fn intervals(store: &HistoryStore, segments: &[&str]) -> Vec<(i64, i64, StateValue)> {
    let quark = store
        .find(&path(segments))
        .unwrap_or_else(|| panic!("attribute {:?} missing", segments));
    store
        .intervals(quark)
        .iter()
        .map(|iv| (iv.start.as_nanos(), iv.end.as_nanos(), iv.value.clone()))
        .collect()
}

/// Analysis that keeps intervals open at end of stream
pub fn open_ended() -> Analysis {
    Analysis::builder()
        .close_at_end(false)
        .build()
        .unwrap()
}

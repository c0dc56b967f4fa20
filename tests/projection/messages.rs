//! Zipkin message lifecycle

use crate::common::*;
use tracestate::prelude::*;

const MSG: [&str; 4] = ["osd-0", "1200", "msg", "status"];

#[test]
fn full_lifecycle() {
    let mut analysis = Analysis::new();
    analysis
        .run(vec![
            zipkin(100, "osd-0", 1200, "async enqueueing message"),
            zipkin(200, "osd-0", 1200, "async writing message"),
            zipkin(300, "osd-0", 1200, "osd op reply"),
            zipkin(400, "osd-0", 1200, "finish"),
        ])
        .unwrap();

    // the reply rewrites the writing interval in place, keeping its start
    assert_eq!(
        intervals(analysis.store(), &MSG),
        vec![(100, 200, StateValue::Int(2)), (200, 400, StateValue::Int(4))]
    );
    let store = analysis.store();
    assert_eq!(store.query_path(&path(&MSG), ts(250)), Some(StateValue::Int(4)));
}

#[test]
fn destructed_closes_message() {
    let mut analysis = Analysis::new();
    analysis
        .run(vec![
            zipkin(10, "osd-0", 1200, "async enqueueing message"),
            zipkin(30, "osd-0", 1200, "message destructed"),
        ])
        .unwrap();

    assert_eq!(
        intervals(analysis.store(), &MSG),
        vec![(10, 30, StateValue::Int(2))]
    );
}

#[test]
fn reply_without_open_is_skipped() {
    let mut analysis = Analysis::new();
    let summary = analysis
        .run(vec![zipkin(10, "osd-0", 1200, "osd op reply")])
        .unwrap();

    assert_eq!(summary.malformed, 1);
    assert_eq!(summary.projected, 0);
    assert!(analysis.store().state_at(ts(10)).is_empty());
}

#[test]
fn reply_after_finish_is_skipped() {
    let mut analysis = Analysis::new();
    let summary = analysis
        .run(vec![
            zipkin(10, "osd-0", 1200, "async writing message"),
            zipkin(20, "osd-0", 1200, "finish"),
            zipkin(30, "osd-0", 1200, "osd op reply"),
        ])
        .unwrap();

    assert_eq!(summary.malformed, 1);
    assert_eq!(
        intervals(analysis.store(), &MSG),
        vec![(10, 20, StateValue::Int(3))]
    );
}

#[test]
fn unknown_tag_is_ignored() {
    let mut analysis = Analysis::new();
    let summary = analysis
        .run(vec![zipkin(10, "osd-0", 1200, "throttled")])
        .unwrap();

    assert_eq!(summary.ignored, 1);
    assert_eq!(analysis.store().attributes().count(), 0);
}

#[test]
fn hosts_do_not_share_messages() {
    let mut analysis = Analysis::new();
    analysis
        .run(vec![
            zipkin(10, "osd-0", 1200, "async enqueueing message"),
            zipkin(15, "osd-1", 1200, "async writing message"),
            zipkin(20, "osd-0", 1200, "finish"),
            zipkin(25, "osd-1", 1200, "finish"),
        ])
        .unwrap();

    let store = analysis.store();
    assert_eq!(intervals(store, &MSG), vec![(10, 20, StateValue::Int(2))]);
    assert_eq!(
        intervals(store, &["osd-1", "1200", "msg", "status"]),
        vec![(15, 25, StateValue::Int(3))]
    );
}

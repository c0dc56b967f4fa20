//! Per-host timestamp ordering

use crate::common::*;
use tracestate::prelude::*;

#[test]
fn backwards_timestamp_aborts_run() {
    let mut analysis = Analysis::new();
    let err = analysis
        .run(vec![
            process_start(100, "node-1", 1, 1),
            process_finish(50, "node-1", 1, 1),
            process_start(200, "node-1", 1, 2),
        ])
        .unwrap_err();

    assert!(err.is_ordering_violation());
    match err {
        Error::OrderingViolation { host, last, ts: at } => {
            assert_eq!(host, "node-1");
            assert_eq!(last, ts(100));
            assert_eq!(at, ts(50));
        }
        other => panic!("unexpected error {:?}", other),
    }

    // state stays as it was after the last good event
    let store = analysis.store();
    let quark = store.find(&path(&["node-1", "1", "1", "status"])).unwrap();
    assert_eq!(store.ongoing(quark), Some((ts(100), &StateValue::Int(1))));
    assert!(store.find(&path(&["node-1", "1", "2", "status"])).is_none());
}

#[test]
fn equal_timestamps_are_accepted() {
    let mut analysis = Analysis::new();
    analysis
        .run(vec![
            process_start(100, "node-1", 1, 1),
            process_finish(100, "node-1", 1, 1),
        ])
        .unwrap();

    assert_eq!(
        intervals(analysis.store(), &["node-1", "1", "1", "status"]),
        vec![(100, 100, StateValue::Int(1))]
    );
}

#[test]
fn hosts_are_ordered_independently() {
    let mut analysis = Analysis::new();
    let summary = analysis
        .run(vec![
            process_start(100, "node-1", 1, 1),
            process_start(40, "node-2", 1, 1),
            process_finish(120, "node-1", 1, 1),
            process_finish(60, "node-2", 1, 1),
        ])
        .unwrap();

    assert_eq!(summary.projected, 4);
    assert_eq!(analysis.registry().host_count(), 2);
    assert_eq!(
        analysis.registry().host("node-2").unwrap().last_timestamp(),
        Some(ts(60))
    );
}

#[test]
fn ignored_events_still_advance_host_clock() {
    let mut analysis = Analysis::new();
    let err = analysis
        .run(vec![
            Event::new("sched_switch", 500, "node-1"),
            process_start(100, "node-1", 1, 1),
        ])
        .unwrap_err();

    assert!(err.is_ordering_violation());
}

#[test]
fn shared_session_written_out_of_order_names_host() {
    let mut analysis = Analysis::new();
    let err = analysis
        .run(vec![bfd(10, "sw-1", 5, "Up"), bfd(5, "sw-2", 5, "Down")])
        .unwrap_err();

    assert!(err.is_ordering_violation());
    assert!(err.to_string().contains("'sw-2'"));
    match err {
        Error::OrderingViolation { host, last, ts: at } => {
            assert_eq!(host, "sw-2");
            assert_eq!(last, ts(10));
            assert_eq!(at, ts(5));
        }
        other => panic!("unexpected error {:?}", other),
    }

    let session = path(&["bfd_fsm_sid", "005", "status"]);
    assert_eq!(
        analysis.store().query_path(&session, ts(50)),
        Some(StateValue::Int(13))
    );
}

#[test]
fn oam_group_written_out_of_order_is_fatal() {
    let mut analysis = Analysis::new();
    let err = analysis
        .run(vec![oam(100, "sw-1", 4, 1), oam(60, "sw-2", 4, 2)])
        .unwrap_err();

    assert!(err.is_ordering_violation());
}

#[test]
fn cancelled_run_keeps_intervals_open() {
    use std::sync::atomic::AtomicBool;

    let mut analysis = Analysis::new();
    let cancel = AtomicBool::new(true);
    let summary = analysis
        .run_cancellable(vec![process_start(10, "node-1", 1, 1)], &cancel)
        .unwrap();

    assert!(summary.cancelled);
    assert_eq!(summary.events, 0);
    assert_eq!(analysis.store().attributes().count(), 0);
}

//! Work-queue process lifecycle

use crate::common::*;
use tracestate::prelude::*;

const STATUS: [&str; 4] = ["node-1", "42", "7", "status"];

#[test]
fn start_finish_produces_running_interval() {
    let mut analysis = Analysis::new();
    analysis
        .run(vec![
            process_start(100, "node-1", 42, 7),
            process_finish(250, "node-1", 42, 7),
        ])
        .unwrap();

    let store = analysis.store();
    assert_eq!(
        intervals(store, &STATUS),
        vec![(100, 250, StateValue::Int(1))]
    );
    assert_eq!(store.query_path(&path(&STATUS), ts(99)), None);
    assert_eq!(store.query_path(&path(&STATUS), ts(100)), Some(StateValue::Int(1)));
    assert_eq!(store.query_path(&path(&STATUS), ts(249)), Some(StateValue::Int(1)));
    assert_eq!(store.query_path(&path(&STATUS), ts(250)), None);
}

#[test]
fn event_name_without_provider_prefix() {
    let mut analysis = Analysis::new();
    let start = Event::new("opwq_process_start", 10, "node-1")
        .with_field("vpid", FieldValue::Int(42))
        .with_field("vtid", FieldValue::Int(7));
    let finish = Event::new("opwq_process_finish", 20, "node-1")
        .with_field("vpid", FieldValue::Int(42))
        .with_field("vtid", FieldValue::Int(7));
    analysis.run(vec![start, finish]).unwrap();

    assert_eq!(
        intervals(analysis.store(), &STATUS),
        vec![(10, 20, StateValue::Int(1))]
    );
}

#[test]
fn restart_splits_interval() {
    let mut analysis = Analysis::new();
    analysis
        .run(vec![
            process_start(10, "node-1", 42, 7),
            process_start(15, "node-1", 42, 7),
            process_finish(20, "node-1", 42, 7),
        ])
        .unwrap();

    assert_eq!(
        intervals(analysis.store(), &STATUS),
        vec![(10, 15, StateValue::Int(1)), (15, 20, StateValue::Int(1))]
    );
}

#[test]
fn finish_without_start_writes_nothing() {
    let mut analysis = Analysis::new();
    let summary = analysis
        .run(vec![process_finish(20, "node-1", 42, 7)])
        .unwrap();

    assert_eq!(summary.events, 1);
    assert_eq!(summary.malformed, 0);
    let store = analysis.store();
    let written = store
        .find(&path(&STATUS))
        .map(|quark| store.intervals(quark).len())
        .unwrap_or(0);
    assert_eq!(written, 0);
    assert!(store.state_at(ts(20)).is_empty());
}

#[test]
fn threads_are_independent() {
    let mut analysis = open_ended();
    analysis
        .run(vec![
            process_start(10, "node-1", 42, 7),
            process_start(12, "node-1", 42, 8),
            process_finish(14, "node-1", 42, 7),
        ])
        .unwrap();

    let store = analysis.store();
    assert_eq!(
        intervals(store, &["node-1", "42", "7", "status"]),
        vec![(10, 14, StateValue::Int(1))]
    );
    let tid8 = store.find(&path(&["node-1", "42", "8", "status"])).unwrap();
    assert_eq!(store.ongoing(tid8), Some((ts(12), &StateValue::Int(1))));
}

#[test]
fn ongoing_intervals_close_at_last_timestamp() {
    let mut analysis = Analysis::new();
    let summary = analysis
        .run(vec![
            process_start(10, "node-1", 42, 7),
            Event::new("sched_switch", 40, "node-2"),
        ])
        .unwrap();

    assert_eq!(summary.closed_at_end, 1);
    assert_eq!(summary.ignored, 1);
    assert_eq!(
        intervals(analysis.store(), &STATUS),
        vec![(10, 40, StateValue::Int(1))]
    );
}

#[test]
fn missing_field_skips_event() {
    let mut analysis = Analysis::new();
    let broken = Event::new("osd:opwq_process_start", 10, "node-1")
        .with_field("vpid", FieldValue::Int(42));
    let summary = analysis
        .run(vec![broken, process_start(20, "node-1", 42, 7)])
        .unwrap();

    assert_eq!(summary.malformed, 1);
    assert_eq!(summary.projected, 1);
    let store = analysis.store();
    assert_eq!(store.query_path(&path(&STATUS), ts(15)), None);
}

#[test]
fn context_prefixed_fields_are_accepted() {
    let mut analysis = open_ended();
    let start = Event::new("osd:opwq_process_start", 10, "node-1")
        .with_field("context._vpid", FieldValue::Int(42))
        .with_field("context._vtid", FieldValue::Int(7));
    analysis.run(vec![start]).unwrap();

    assert_eq!(
        analysis.store().query_path(&path(&STATUS), ts(10)),
        Some(StateValue::Int(1))
    );
}

#[test]
fn disabled_family_is_ignored() {
    let mut analysis = Analysis::builder()
        .disable(Family::Process)
        .build()
        .unwrap();
    let summary = analysis
        .run(vec![
            process_start(10, "node-1", 42, 7),
            process_finish(20, "node-1", 42, 7),
        ])
        .unwrap();

    assert_eq!(summary.ignored, 2);
    assert_eq!(analysis.store().attributes().count(), 0);
}

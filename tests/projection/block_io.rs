//! Block request correlation

use crate::common::*;
use tracestate::prelude::*;

#[test]
fn insert_then_complete_finalises_request() {
    let mut analysis = Analysis::new();
    let summary = analysis
        .run(vec![
            block_insert(100, "node-1", 8, 2048, 16, 311),
            block_complete(175, "node-1", 8, 2048),
        ])
        .unwrap();

    assert_eq!(summary.bookkept, 2);
    assert_eq!(summary.unmatched_completions, 0);

    let host = analysis.registry().host("node-1").unwrap();
    let request = host.disks.get(8, 2048).unwrap();
    assert_eq!(request.nr_sector, 16);
    assert_eq!(request.tid, 311);
    assert_eq!(request.start_ts, ts(100));
    assert_eq!(request.end_ts, Some(ts(175)));
    assert_eq!(request.latency(), Some(75));

    // block events never touch the attribute store
    assert_eq!(analysis.store().attributes().count(), 0);
}

#[test]
fn completion_without_insert_is_unmatched() {
    let mut analysis = Analysis::new();
    let summary = analysis
        .run(vec![block_complete(10, "node-1", 8, 2048)])
        .unwrap();

    assert_eq!(summary.unmatched_completions, 1);
    assert!(analysis
        .registry()
        .host("node-1")
        .unwrap()
        .disks
        .get(8, 2048)
        .is_none());
}

#[test]
fn second_completion_is_unmatched() {
    let mut analysis = Analysis::new();
    let summary = analysis
        .run(vec![
            block_insert(10, "node-1", 8, 2048, 16, 311),
            block_complete(20, "node-1", 8, 2048),
            block_complete(30, "node-1", 8, 2048),
        ])
        .unwrap();

    assert_eq!(summary.unmatched_completions, 1);
    let request = analysis
        .registry()
        .host("node-1")
        .unwrap()
        .disks
        .get(8, 2048)
        .cloned()
        .unwrap();
    assert_eq!(request.end_ts, Some(ts(20)));
}

#[test]
fn requests_are_per_host_and_device() {
    let mut analysis = Analysis::new();
    let summary = analysis
        .run(vec![
            block_insert(10, "node-1", 8, 2048, 16, 1),
            block_insert(11, "node-1", 9, 2048, 16, 1),
            block_complete(12, "node-2", 8, 2048),
            block_complete(13, "node-1", 9, 2048),
        ])
        .unwrap();

    assert_eq!(summary.unmatched_completions, 1);
    let disks = &analysis.registry().host("node-1").unwrap().disks;
    assert_eq!(disks.device_count(), 2);
    assert_eq!(disks.pending_count(), 1);
    assert!(disks.get(8, 2048).unwrap().end_ts.is_none());
}

#[test]
fn drain_completed_requests() {
    let mut analysis = Analysis::new();
    analysis
        .run(vec![
            block_insert(10, "node-1", 8, 100, 8, 1),
            block_insert(11, "node-1", 8, 200, 8, 1),
            block_complete(12, "node-1", 8, 100),
        ])
        .unwrap();

    let host = analysis.registry_mut().get_or_create_host("node-1");
    let drained = host.disks.drain_completed();
    assert_eq!(drained.len(), 1);
    assert_eq!(drained[0].0, 8);
    assert_eq!(drained[0].1.sector, 100);
    assert_eq!(host.disks.pending_count(), 1);
}

#[test]
fn insert_without_tid_is_malformed() {
    let mut analysis = Analysis::new();
    let event = Event::new("block_rq_insert", 10, "node-1")
        .with_field("dev", FieldValue::Int(8))
        .with_field("sector", FieldValue::Int(100))
        .with_field("nr_sector", FieldValue::Int(8));
    let summary = analysis.run(vec![event]).unwrap();

    assert_eq!(summary.malformed, 1);
    assert_eq!(
        analysis.registry().host("node-1").unwrap().disks.device_count(),
        0
    );
}

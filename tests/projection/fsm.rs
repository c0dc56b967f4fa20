//! BFD and OAM state machines

use crate::common::*;
use tracestate::prelude::*;

const SESSION: [&str; 3] = ["bfd_fsm_sid", "005", "status"];

#[test]
fn bfd_unknown_state_keeps_previous() {
    let mut analysis = open_ended();
    analysis
        .run(vec![
            bfd(100, "sw-1", 5, "Up"),
            bfd(200, "sw-1", 5, "AdminDown"),
            bfd(300, "sw-1", 5, "Down"),
        ])
        .unwrap();

    let store = analysis.store();
    assert_eq!(intervals(store, &SESSION), vec![(100, 300, StateValue::Int(13))]);
    let quark = store.find(&path(&SESSION)).unwrap();
    assert_eq!(store.ongoing(quark), Some((ts(300), &StateValue::Int(12))));
    assert_eq!(analysis.summary().ignored, 1);
}

#[test]
fn bfd_state_codes() {
    let mut analysis = Analysis::new();
    analysis
        .run(vec![
            bfd(10, "sw-1", 5, "Init"),
            bfd(20, "sw-1", 5, "Up"),
            bfd(30, "sw-1", 5, "Down"),
            bfd(40, "sw-1", 5, "Up"),
        ])
        .unwrap();

    assert_eq!(
        intervals(analysis.store(), &SESSION),
        vec![
            (10, 20, StateValue::Int(11)),
            (20, 30, StateValue::Int(13)),
            (30, 40, StateValue::Int(12)),
            (40, 40, StateValue::Int(13)),
        ]
    );
}

#[test]
fn bfd_label_as_plain_string() {
    let mut analysis = open_ended();
    let event = Event::new("bfd_fsm__state_change", 10, "sw-1")
        .with_field("sid_m", FieldValue::Int(5))
        .with_field("next_state", FieldValue::Str("up".into()));
    analysis.run(vec![event]).unwrap();

    assert_eq!(
        analysis.store().query_path(&path(&SESSION), ts(10)),
        Some(StateValue::Int(13))
    );
}

#[test]
fn oam_writes_reported_status() {
    let mut analysis = open_ended();
    analysis
        .run(vec![
            oam(10, "sw-1", 4, 7),
            oam(20, "sw-1", 4, 7),
            oam(30, "sw-1", 4, 2),
        ])
        .unwrap();

    let store = analysis.store();
    let group = ["hal_oam_prot_group", "004", "status"];
    // every report starts a new interval, even when the value repeats
    assert_eq!(
        intervals(store, &group),
        vec![(10, 20, StateValue::Int(7)), (20, 30, StateValue::Int(7))]
    );
    assert_eq!(store.query_path(&path(&group), ts(35)), Some(StateValue::Int(2)));
}

#[test]
fn id_padding_is_configurable() {
    let mut analysis = Analysis::builder()
        .id_padding(5)
        .close_at_end(false)
        .build()
        .unwrap();
    analysis
        .run(vec![bfd(10, "sw-1", 42, "Up"), oam(11, "sw-1", 1234567, 1)])
        .unwrap();

    let store = analysis.store();
    assert!(store.find(&path(&["bfd_fsm_sid", "00042", "status"])).is_some());
    // wider ids are never truncated
    assert!(store
        .find(&path(&["hal_oam_prot_group", "1234567", "status"]))
        .is_some());
}

#[test]
fn sessions_are_global_across_hosts() {
    let mut analysis = open_ended();
    analysis
        .run(vec![bfd(10, "sw-1", 5, "Up"), bfd(20, "sw-2", 5, "Down")])
        .unwrap();

    let store = analysis.store();
    assert_eq!(intervals(store, &SESSION), vec![(10, 20, StateValue::Int(13))]);
}

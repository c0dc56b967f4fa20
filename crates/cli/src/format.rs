//! Output formatting for `project`.

use anyhow::Result;
use serde_json::json;
use tracestate::prelude::{AttributePath, HistoryStore, RunSummary, StateValue, Timestamp};

fn summary_line(summary: &RunSummary) -> String {
    format!(
        "events: {}  projected: {}  bookkept: {}  ignored: {}  malformed: {}  unmatched: {}",
        summary.events,
        summary.projected,
        summary.bookkept,
        summary.ignored,
        summary.malformed,
        summary.unmatched_completions,
    )
}

/// Summary plus every attribute's value at `at`.
pub fn text_state(summary: &RunSummary, at: Timestamp, state: &[(AttributePath, StateValue)]) -> String {
    let mut out = summary_line(summary);
    out.push_str(&format!("\nstate at {}:", at));
    if state.is_empty() {
        out.push_str(" (none)");
    }
    for (path, value) in state {
        out.push_str(&format!("\n  {} = {}", path, value));
    }
    out
}

/// Summary plus every interval of every attribute, ongoing ones last.
pub fn text_history(summary: &RunSummary, store: &HistoryStore) -> String {
    let mut out = summary_line(summary);
    for (quark, path) in sorted_attributes(store) {
        let intervals = store.intervals(quark);
        let ongoing = store.ongoing(quark);
        if intervals.is_empty() && ongoing.is_none() {
            continue;
        }
        out.push_str(&format!("\n{}", path));
        for iv in intervals {
            out.push_str(&format!(
                "\n  [{}, {}) {}",
                iv.start.as_nanos(),
                iv.end.as_nanos(),
                iv.value
            ));
        }
        if let Some((start, value)) = ongoing {
            out.push_str(&format!("\n  [{}, ...) {}", start.as_nanos(), value));
        }
    }
    out
}

pub fn json_state(
    summary: &RunSummary,
    at: Timestamp,
    state: &[(AttributePath, StateValue)],
) -> Result<String> {
    let attributes: serde_json::Map<String, serde_json::Value> = state
        .iter()
        .map(|(path, value)| (path.to_string(), value_json(value)))
        .collect();
    let doc = json!({
        "summary": summary,
        "at": at.as_nanos(),
        "state": attributes,
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn json_history(summary: &RunSummary, store: &HistoryStore) -> Result<String> {
    let mut attributes = serde_json::Map::new();
    for (quark, path) in sorted_attributes(store) {
        let mut intervals: Vec<serde_json::Value> = store
            .intervals(quark)
            .iter()
            .map(|iv| {
                json!({
                    "start": iv.start.as_nanos(),
                    "end": iv.end.as_nanos(),
                    "value": value_json(&iv.value),
                })
            })
            .collect();
        if let Some((start, value)) = store.ongoing(quark) {
            intervals.push(json!({
                "start": start.as_nanos(),
                "end": null,
                "value": value_json(value),
            }));
        }
        if !intervals.is_empty() {
            attributes.insert(path.to_string(), serde_json::Value::Array(intervals));
        }
    }
    let doc = json!({
        "summary": summary,
        "attributes": attributes,
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}

fn sorted_attributes(store: &HistoryStore) -> Vec<(tracestate::prelude::Quark, AttributePath)> {
    let mut attrs: Vec<_> = store.attributes().collect();
    attrs.sort_by(|a, b| a.1.cmp(&b.1));
    attrs
}

fn value_json(value: &StateValue) -> serde_json::Value {
    match value {
        StateValue::Null => serde_json::Value::Null,
        StateValue::Int(n) => json!(n),
        StateValue::String(s) => json!(s),
    }
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use apidiff_core::config::ReportOptions;
use apidiff_core::model::EventLog;
use apidiff_core::replay::{api_set, replay};
use apidiff_core::report::{MemoryWriter, PageRegistry, ReportContext};
use apidiff_core::ExErrorKind;

const LOG: &str = r#"{
    "apis": [
        {"name": "jdk20", "label": "JDK 20"},
        {"name": "jdk21", "label": "JDK 21"}
    ],
    "events": [
        {"event": "comparing",
         "position": {"element": {"kind": "module", "name": "java.base"}},
         "values": {
            "jdk20": {"symbol": {"kind": "module", "name": "java.base", "signature": "module java.base"}},
            "jdk21": {"symbol": {"kind": "module", "name": "java.base", "signature": "module java.base"}}}},
        {"event": "comparing",
         "position": {"element": {"kind": "package", "module": {"kind": "module", "name": "java.base"}, "name": "java.util"}},
         "values": {
            "jdk20": {"symbol": {"kind": "package", "name": "java.util"}},
            "jdk21": {"symbol": {"kind": "package", "name": "java.util"}}}},
        {"event": "comparing",
         "position": {"element": {"kind": "type",
            "enclosing": {"kind": "package", "module": {"kind": "module", "name": "java.base"}, "name": "java.util"},
            "name": "SequencedCollection"}},
         "values": {
            "jdk21": {"symbol": {"kind": "interface", "name": "SequencedCollection",
                                 "signature": "public interface SequencedCollection<E>"}}}},
        {"event": "missing",
         "position": {"element": {"kind": "type",
            "enclosing": {"kind": "package", "module": {"kind": "module", "name": "java.base"}, "name": "java.util"},
            "name": "SequencedCollection"}},
         "missing": ["jdk20"]},
        {"event": "completed",
         "position": {"element": {"kind": "type",
            "enclosing": {"kind": "package", "module": {"kind": "module", "name": "java.base"}, "name": "java.util"},
            "name": "SequencedCollection"}},
         "equal": false},
        {"event": "different",
         "position": {"element": {"kind": "package", "module": {"kind": "module", "name": "java.base"}, "name": "java.util"}},
         "values": {"raw_doc_comments": {"jdk20": "Collections.", "jdk21": "Collections.\nNow sequenced."}}},
        {"event": "completed",
         "position": {"element": {"kind": "package", "module": {"kind": "module", "name": "java.base"}, "name": "java.util"}},
         "equal": false},
        {"event": "completed",
         "position": {"element": {"kind": "module", "name": "java.base"}},
         "equal": false}
    ]
}"#;

fn run(log: &EventLog) -> apidiff_core::Result<MemoryWriter> {
    let ctx = ReportContext::new(api_set(log)?, ReportOptions::default());
    let mut registry = PageRegistry::new(ctx, MemoryWriter::new());
    replay(log, &mut registry)?;
    Ok(registry.into_writer())
}

#[test]
fn test_replay_writes_every_page() {
    let log = EventLog::from_json(LOG).unwrap();
    let writer = run(&log).unwrap();

    let paths: Vec<&str> = writer.paths().collect();
    assert_eq!(
        paths,
        vec![
            "index.html",
            "java.base/java/util/SequencedCollection.html",
            "java.base/java/util/package-summary.html",
            "java.base/module-summary.html",
            "notes.html",
            "resources/apidiff.css",
        ]
    );

    let type_page = writer.get("java.base/java/util/SequencedCollection.html").unwrap();
    assert!(type_page.contains("Interface java.util.SequencedCollection"));
    assert!(type_page.contains("href=\"../../../resources/apidiff.css\""));
    assert!(type_page.contains("class=\"glyph added\""));

    let module_page = writer.get("java.base/module-summary.html").unwrap();
    assert!(module_page.contains("href=\"java/util/package-summary.html\""));
}

#[test]
fn test_replay_rolls_counts_to_index() {
    let log = EventLog::from_json(LOG).unwrap();
    let writer = run(&log).unwrap();

    let index = writer.get("index.html").unwrap();
    assert!(index.contains("JDK 21"));
    assert!(index.contains("href=\"java.base/module-summary.html\""));
    // one added type and one extended comment
    assert!(index.contains("<th class=\"total\">2</th>"));
}

#[test]
fn test_replay_json_fixture_round_trip() {
    let log = EventLog::from_json(LOG).unwrap();
    let again = EventLog::from_json(&log.to_json().unwrap()).unwrap();
    assert_eq!(log, again);
}

#[test]
fn test_replay_rejects_unknown_api() {
    let log = EventLog::from_json(&LOG.replace("[\"jdk20\"]", "[\"jdk8\"]")).unwrap();
    let err = run(&log).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::UnknownApi);
}

#[test]
fn test_replay_rejects_single_api() {
    let log = EventLog::from_json(r#"{"apis": [{"name": "only"}], "events": []}"#).unwrap();
    let err = run(&log).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_replay_rejects_incomplete_log() {
    let truncated = LOG.replace(
        r#",
        {"event": "completed",
         "position": {"element": {"kind": "module", "name": "java.base"}},
         "equal": false}"#,
        "",
    );
    let log = EventLog::from_json(&truncated).unwrap();
    assert_eq!(log.events.len(), 7);
    let err = run(&log).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

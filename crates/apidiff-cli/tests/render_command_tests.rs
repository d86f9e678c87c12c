//! End-to-end tests of `apidiff render`

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::json;
use tempfile::TempDir;

fn write_log(dir: &Path) -> PathBuf {
    let package = json!({"element": {"kind": "package", "name": "com.example"}});
    let widget = json!({"element": {"kind": "type",
        "enclosing": {"kind": "package", "name": "com.example"},
        "name": "Widget"}});
    let log = json!({
        "apis": [{"name": "v1", "label": "1.0"}, {"name": "v2", "label": "2.0"}],
        "events": [
            {"event": "comparing", "position": package,
             "values": {"v1": {"symbol": {"kind": "package", "name": "com.example"}},
                        "v2": {"symbol": {"kind": "package", "name": "com.example"}}}},
            {"event": "comparing", "position": widget,
             "values": {"v1": {"symbol": {"kind": "class", "name": "Widget",
                                          "signature": "public class Widget"}},
                        "v2": {"symbol": {"kind": "class", "name": "Widget",
                                          "signature": "public final class Widget"}}}},
            {"event": "different", "position": widget,
             "values": {"modifiers": {"v1": ["public"], "v2": ["public", "final"]}}},
            {"event": "completed", "position": widget, "equal": false},
            {"event": "completed", "position": package, "equal": false}
        ]
    });
    let path = dir.join("events.json");
    fs::write(&path, serde_json::to_string_pretty(&log).unwrap()).unwrap();
    path
}

fn apidiff(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_apidiff"))
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_render_writes_report() {
    let temp_dir = TempDir::new().unwrap();
    let events = write_log(temp_dir.path());
    let out = temp_dir.path().join("report");

    let output = apidiff(&[
        "render",
        "--events",
        events.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
        "--title",
        "Widget API",
        "--log-format",
        "json",
    ]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("index.html"));

    let index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("Widget API"));
    let page = fs::read_to_string(out.join("com/example/Widget.html")).unwrap();
    assert!(page.contains("public final class Widget"));
    assert!(out.join("resources/apidiff.css").is_file());
    assert!(out.join("com/example/package-summary.html").is_file());
}

#[test]
fn test_render_reads_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let events = write_log(temp_dir.path());
    let config = temp_dir.path().join("apidiff.toml");
    fs::write(
        &config,
        r#"
title = "From Config"
timestamp = false

[[notes]]
name = "com.example.Widget"
uri = "https://example.com/widget"
"#,
    )
    .unwrap();
    let out = temp_dir.path().join("report");

    let output = apidiff(&[
        "render",
        "--events",
        events.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--log-format",
        "json",
    ]);
    assert!(output.status.success());

    let index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("From Config"));
    assert!(!index.contains("Generated "));
    let notes = fs::read_to_string(out.join("notes.html")).unwrap();
    assert!(notes.contains("https://example.com/widget"));
}

#[test]
fn test_render_missing_events_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = apidiff(&[
        "render",
        "--events",
        temp_dir.path().join("absent.json").to_str().unwrap(),
        "--output",
        temp_dir.path().join("report").to_str().unwrap(),
        "--log-format",
        "json",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: [ERR_IO]"));
}

#[test]
fn test_render_invalid_log_fails() {
    let temp_dir = TempDir::new().unwrap();
    let events = temp_dir.path().join("events.json");
    fs::write(&events, "{\"apis\": [{\"name\": \"only\"}]}").unwrap();

    let output = apidiff(&[
        "render",
        "--events",
        events.to_str().unwrap(),
        "--output",
        temp_dir.path().join("report").to_str().unwrap(),
        "--log-format",
        "json",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_INPUT"));
}

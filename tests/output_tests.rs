//! Integration tests for the output writers and path resolution.

use std::fs;
use std::path::Path;

use chrono::{Local, TimeZone, Utc};
use tempfile::tempdir;

use tgexport::core::output::TIMESTAMP_FORMAT;
use tgexport::format::{OutputFormat, resolve_output_path, to_format_string, write_to_format};
use tgexport::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

fn sample_entries() -> Vec<ExtractedEntry> {
    vec![
        ExtractedEntry::new(Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap(), "Newest post")
            .with_id(30),
        ExtractedEntry::new(
            Utc.with_ymd_and_hms(2024, 1, 4, 18, 0, 0).unwrap(),
            "Multi-line\npost with \"quotes\"",
        )
        .with_id(29),
        ExtractedEntry::new(Utc.with_ymd_and_hms(2024, 1, 3, 7, 15, 0).unwrap(), "Привет 🎉")
            .with_id(28),
    ]
}

fn local_stamp(entry: &ExtractedEntry) -> String {
    entry
        .timestamp
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

// ============================================================================
// Text output
// ============================================================================

#[test]
fn test_text_layout() {
    let entries = sample_entries();
    let text = to_text(&entries, &OutputConfig::new());

    let blocks: Vec<&str> = text.trim_end().split(&format!("\n\n{}\n\n", DIVIDER)).collect();
    assert_eq!(blocks.len(), 3);

    for (block, entry) in blocks.iter().zip(&entries) {
        let (stamp, body) = block.split_once('\n').unwrap();
        assert_eq!(stamp, local_stamp(entry));
        assert_eq!(body, entry.text);
    }
}

#[test]
fn test_text_no_trailing_divider() {
    let text = to_text(&sample_entries(), &OutputConfig::new());
    assert!(text.ends_with("Привет 🎉\n"));
    assert_eq!(text.matches(DIVIDER).count(), 2);
}

#[test]
fn test_text_ids_opt_in() {
    let entries = sample_entries();
    let plain = to_text(&entries, &OutputConfig::new());
    let with_ids = to_text(&entries, &OutputConfig::new().with_ids());

    assert!(!plain.contains("#30"));
    assert!(with_ids.starts_with(&format!("{} #30\n", local_stamp(&entries[0]))));
}

#[test]
fn test_text_empty_export_writes_empty_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.txt");

    write_text(&[], &path, &OutputConfig::new()).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

// ============================================================================
// JSON output
// ============================================================================

#[test]
fn test_json_array_of_records() {
    let json = to_json(&sample_entries(), &OutputConfig::new()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["text"], "Newest post");
    assert_eq!(records[0]["date"], "2024-01-05T09:30:00Z");
    assert!(records[0].get("id").is_none());
    assert_eq!(records[1]["text"], "Multi-line\npost with \"quotes\"");
}

#[test]
fn test_json_ids_opt_in() {
    let json = to_json(&sample_entries(), &OutputConfig::new().with_ids()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[2]["id"], 28);
}

#[test]
fn test_json_unicode_preserved() {
    let json = to_json(&sample_entries(), &OutputConfig::new()).unwrap();
    assert!(json.contains("Привет 🎉"));
}

#[test]
fn test_json_empty_is_empty_array() {
    let json = to_json(&[], &OutputConfig::new()).unwrap();
    assert_eq!(json, "[]");
}

#[test]
fn test_json_reads_back_in_order() {
    let entries = sample_entries();
    let json = to_json(&entries, &OutputConfig::new().with_ids()).unwrap();
    let parsed: Vec<ExtractedEntry> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, entries);
}

// ============================================================================
// Format dispatch and paths
// ============================================================================

#[test]
fn test_write_to_format_creates_parents() {
    let dir = tempdir().unwrap();
    let path = resolve_output_path("exports/jan/result", OutputFormat::Json, dir.path());

    write_to_format(&sample_entries(), &path, OutputFormat::Json, &OutputConfig::new()).unwrap();

    assert!(dir.path().join("exports/jan/result.json").exists());
}

#[test]
fn test_to_format_string_matches_writers() {
    let entries = sample_entries();
    let config = OutputConfig::new();

    assert_eq!(
        to_format_string(&entries, OutputFormat::Txt, &config).unwrap(),
        to_text(&entries, &config)
    );
    assert_eq!(
        to_format_string(&entries, OutputFormat::Json, &config).unwrap(),
        to_json(&entries, &config).unwrap()
    );
}

#[test]
fn test_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("result.txt");
    fs::write(&path, "old content that is longer than the new one").unwrap();

    write_text(&sample_entries()[..1], &path, &OutputConfig::new()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("Newest post"));
    assert!(!content.contains("old content"));
}

#[cfg(unix)]
#[test]
fn test_write_error_reports_path() {
    let dir = tempdir().unwrap();
    // A regular file where a directory is expected
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let path = blocker.join("result.txt");

    let err = write_text(&sample_entries(), &path, &OutputConfig::new()).unwrap_err();

    assert!(err.is_write());
    assert!(err.to_string().contains("blocker"));
}

#[test]
fn test_resolve_output_path_extension() {
    let base = Path::new("/downloads");
    assert_eq!(
        resolve_output_path("result", OutputFormat::Txt, base),
        base.join("result.txt")
    );
    assert_eq!(
        resolve_output_path("result", OutputFormat::Json, base),
        base.join("result.json")
    );
}

//! JSON output writer.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::write_file;
use crate::core::models::{ExtractedEntry, OutputConfig};
use crate::error::TgExportError;

/// Entry shape for JSON output.
/// Only includes fields enabled in `OutputConfig`.
#[derive(Serialize)]
struct JsonEntry<'a> {
    date: &'a DateTime<Utc>,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
}

impl<'a> JsonEntry<'a> {
    fn from_entry(entry: &'a ExtractedEntry, config: &OutputConfig) -> Self {
        Self {
            date: &entry.timestamp,
            text: &entry.text,
            id: if config.include_ids { entry.id } else { None },
        }
    }
}

/// Writes entries to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"date": "2024-01-04T12:00:00Z", "text": "Newest post"},
///   {"date": "2024-01-03T12:00:00Z", "text": "Older post"}
/// ]
/// ```
pub fn write_json(
    entries: &[ExtractedEntry],
    output_path: &Path,
    config: &OutputConfig,
) -> Result<(), TgExportError> {
    let json = to_json(entries, config)?;
    write_file(output_path, json.as_bytes())
}

/// Converts entries to a JSON array string.
///
/// The output deserializes back into `Vec<ExtractedEntry>` in the same order.
pub fn to_json(entries: &[ExtractedEntry], config: &OutputConfig) -> Result<String, TgExportError> {
    let json_entries: Vec<JsonEntry<'_>> = entries
        .iter()
        .map(|e| JsonEntry::from_entry(e, config))
        .collect();

    Ok(serde_json::to_string_pretty(&json_entries)?)
}

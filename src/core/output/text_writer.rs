//! Plain text output writer.

use std::path::Path;

use chrono::Local;

use super::write_file;
use crate::core::models::{ExtractedEntry, OutputConfig};
use crate::error::TgExportError;

/// Line placed between two entries.
pub const DIVIDER: &str = "----------------------------------------";

/// Timestamp format of the header line, in local time.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Writes entries to a text file.
///
/// # Format
/// ```text
/// 04.01.2024 12:00:00
/// Newest post
///
/// ----------------------------------------
///
/// 03.01.2024 12:00:00
/// Older post
/// ```
pub fn write_text(
    entries: &[ExtractedEntry],
    output_path: &Path,
    config: &OutputConfig,
) -> Result<(), TgExportError> {
    write_file(output_path, to_text(entries, config).as_bytes())
}

/// Renders entries as text.
///
/// Same format as [`write_text`]. Empty input renders as an empty string;
/// otherwise the output ends with a single newline and no divider.
pub fn to_text(entries: &[ExtractedEntry], config: &OutputConfig) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let separator = format!("\n\n{}\n\n", DIVIDER);
    let mut out = entries
        .iter()
        .map(|entry| render_entry(entry, config))
        .collect::<Vec<_>>()
        .join(&separator);
    out.push('\n');
    out
}

fn render_entry(entry: &ExtractedEntry, config: &OutputConfig) -> String {
    let stamp = entry
        .timestamp
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT);
    match entry.id {
        Some(id) if config.include_ids => format!("{} #{}\n{}", stamp, id, entry.text),
        _ => format!("{}\n{}", stamp, entry.text),
    }
}

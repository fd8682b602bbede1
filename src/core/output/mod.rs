//! Output format writers.
//!
//! This module provides writers for the two export formats:
//! - [`write_text`] / [`to_text`] - timestamped posts separated by divider lines
//! - [`write_json`] / [`to_json`] - JSON array of `{date, text}` records - requires `json-output` feature
//!
//! Writers create missing parent directories. Any failure is reported as
//! [`TgExportError::Write`] with the attempted path; nothing is retried.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> tgexport::Result<()> {
//! use tgexport::core::output::{write_text, to_text};
//! use tgexport::core::models::OutputConfig;
//! use tgexport::ExtractedEntry;
//! use chrono::Utc;
//!
//! let entries = vec![ExtractedEntry::new(Utc::now(), "Hello!")];
//!
//! write_text(&entries, "export/result.txt".as_ref(), &OutputConfig::new())?;
//! let text = to_text(&entries, &OutputConfig::new());
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::TgExportError;

#[cfg(feature = "json-output")]
mod json_writer;
mod text_writer;

#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
pub use text_writer::{DIVIDER, TIMESTAMP_FORMAT, to_text, write_text};

/// Writes `bytes` to `path`, creating parent directories first.
pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<(), TgExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TgExportError::write(parent, e))?;
    }

    let mut file = fs::File::create(path).map_err(|e| TgExportError::write(path, e))?;
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|e| TgExportError::write(path, e))?;

    debug!(path = %path.display(), bytes = bytes.len(), "export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_file_reports_path() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let target = blocker.join("out.txt");
        let err = write_file(&target, b"data").unwrap_err();

        assert!(err.is_write());
        assert!(err.to_string().contains("blocker"));
    }

    #[test]
    fn test_write_file_relative_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        write_file(&path, b"abc").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"abc");
    }
}

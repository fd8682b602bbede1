//! Output format types for the tgexport library.
//!
//! This module provides library-first format types that don't depend on CLI
//! frameworks, plus output path resolution.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "json-output")]
//! # fn example() -> tgexport::Result<()> {
//! use tgexport::format::{OutputFormat, resolve_output_path, write_to_format};
//! use tgexport::core::models::OutputConfig;
//! use tgexport::ExtractedEntry;
//! use chrono::Utc;
//!
//! let entries = vec![ExtractedEntry::new(Utc::now(), "Hello!")];
//!
//! let path = resolve_output_path("result", OutputFormat::Json, "/tmp/exports".as_ref());
//! assert_eq!(path, std::path::Path::new("/tmp/exports/result.json"));
//!
//! write_to_format(&entries, &path, OutputFormat::Json, &OutputConfig::new())?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::models::{ExtractedEntry, OutputConfig};
use crate::error::TgExportError;

/// Output format for channel exports.
///
/// # Example
///
/// ```rust
/// use tgexport::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("json").unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.extension(), "json");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Timestamped plain text with divider lines (default)
    #[default]
    Txt,

    /// JSON array of `{date, text}` records
    Json,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Json => "json",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["txt", "json"]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Txt => write!(f, "TXT"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = TgExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Ok(OutputFormat::Txt),
            "json" => Ok(OutputFormat::Json),
            _ => Err(TgExportError::invalid_format(
                "output",
                format!(
                    "unknown format '{}', expected one of: {}",
                    s,
                    OutputFormat::all_names().join(", ")
                ),
            )),
        }
    }
}

/// Appends the format's extension to `name` and, unless `name` is absolute,
/// places it under `base_dir`.
pub fn resolve_output_path(name: &str, format: OutputFormat, base_dir: &Path) -> PathBuf {
    let file = PathBuf::from(format!("{}.{}", name, format.extension()));
    if file.is_absolute() {
        file
    } else {
        base_dir.join(file)
    }
}

/// The user's download directory, falling back to `~/Downloads`, then the
/// current directory.
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Writes entries to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    entries: &[ExtractedEntry],
    path: &Path,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<(), TgExportError> {
    match format {
        OutputFormat::Txt => crate::core::output::write_text(entries, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(entries, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(unavailable(format)),
    }
}

/// Converts entries to a string in the specified format.
///
/// Useful when the caller wants the export in memory rather than on disk.
#[allow(unused_variables)]
pub fn to_format_string(
    entries: &[ExtractedEntry],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, TgExportError> {
    match format {
        OutputFormat::Txt => Ok(crate::core::output::to_text(entries, config)),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(entries, config),
        #[allow(unreachable_patterns)]
        _ => Err(unavailable(format)),
    }
}

fn unavailable(format: OutputFormat) -> TgExportError {
    TgExportError::invalid_format(
        "output",
        format!(
            "Output format {:?} requires the 'json-output' feature to be enabled",
            format
        ),
    )
}

//! Core export logic for tgexport.
//!
//! This module contains:
//! - [`models`] - Raw messages, exported entries, output configuration
//! - [`filter`] - Date bounds
//! - [`extract`] - Body/caption extraction
//! - [`sanitize`] - Link and mention stripping
//! - [`pipeline`] - The date-bounded history walk
//! - [`output`] - Format writers (text, JSON)
//!
//! # Quick Start
//!
//! ```rust
//! use tgexport::core::{
//!     DateRange, ExportOptions, ExtractedEntry, OutputConfig,
//!     export_history, extract_text, sanitize_text, to_text,
//! };
//! ```

pub mod extract;
pub mod filter;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod sanitize;

// Re-export main types for convenience
pub use extract::extract_text;
pub use filter::DateRange;
pub use models::{ExtractedEntry, OutputConfig, RawMessage};
pub use pipeline::{ExportOptions, ExportResult, ExportStats, StopReason, export_history};
pub use sanitize::sanitize_text;

// Conditionally re-export output writers
#[cfg(feature = "json-output")]
pub use output::{to_json, write_json};
pub use output::{to_text, write_text};

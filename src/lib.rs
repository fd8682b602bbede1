//! # tgexport
//!
//! A Rust library and CLI for exporting the post history of a Telegram
//! channel into a plain-text or JSON file.
//!
//! ## Overview
//!
//! An export run:
//! 1. parses a channel reference (link, `@username`, username or numeric id),
//! 2. walks the channel's history newest-first between two `DD.MM.YYYY` dates,
//! 3. takes each post's body or media caption,
//! 4. optionally strips links and `@mentions`,
//! 5. writes the result as timestamped text or a JSON array.
//!
//! The network side sits behind the [`HistorySource`](source::HistorySource)
//! trait. [`telegram::TelegramClient`] implements it over MTProto;
//! [`source::MemorySource`] implements it over a vector, which is what the
//! tests and benchmarks use.
//!
//! ## Quick Start
//!
//! ```rust
//! use tgexport::prelude::*;
//! use chrono::Utc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let source = MemorySource::new(vec![
//!     RawMessage::new(3, Utc::now()).with_body("Hello @team, see https://example.com"),
//!     RawMessage::new(2, Utc::now()).with_caption("Photo of the week"),
//! ]);
//!
//! let channel = ChannelRef::parse("https://t.me/news")?;
//! let options = ExportOptions::new()
//!     .with_range(DateRange::parse(Some("01.01.2024"), None)?)
//!     .with_strip_links(true);
//!
//! let result = export_history(&source, &channel, &options).await?;
//! assert_eq!(result.entries[0].text, "Hello , see");
//!
//! let text = to_text(&result.entries, &OutputConfig::new());
//! assert!(text.contains(DIVIDER));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`channel`] - [`ChannelRef`](channel::ChannelRef) parsing
//! - [`config`] - [`ClientConfig`](config::ClientConfig) from the environment
//! - [`core`] - Core types and functionality
//!   - [`core::models`] - [`RawMessage`], [`ExtractedEntry`], [`OutputConfig`](core::models::OutputConfig)
//!   - [`core::filter`] - [`DateRange`](core::filter::DateRange)
//!   - [`core::extract`] - body/caption selection
//!   - [`core::sanitize`] - link and mention stripping
//!   - [`core::pipeline`] - [`export_history`](core::pipeline::export_history)
//!   - [`core::output`] - text and JSON writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat), output paths
//! - [`source`] - the history source seam
//! - [`telegram`] - the `grammers` client adapter and `--auth` login (requires `telegram` feature)
//! - [`cli`] - CLI argument types (requires `cli` feature)
//! - [`error`] - Unified error types ([`TgExportError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

pub mod channel;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod source;
#[cfg(feature = "telegram")]
pub mod telegram;

// Re-export the main types at the crate root for convenience
pub use crate::core::models::{ExtractedEntry, RawMessage};
pub use error::{Result, TgExportError};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use tgexport::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{Result, TgExportError};

    // Channel references and configuration
    pub use crate::channel::ChannelRef;
    pub use crate::config::ClientConfig;

    // Models
    pub use crate::core::models::{ExtractedEntry, OutputConfig, RawMessage};

    // Filtering and extraction
    pub use crate::core::extract::extract_text;
    pub use crate::core::filter::DateRange;
    pub use crate::core::sanitize::sanitize_text;

    // Pipeline
    pub use crate::core::pipeline::{
        ExportOptions, ExportResult, ExportStats, StopReason, export_history,
    };

    // Sources
    pub use crate::source::{HistoryCursor, HistorySource, MemorySource};

    // Output writers
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, write_json};
    pub use crate::core::output::{DIVIDER, to_text, write_text};

    // Format types
    pub use crate::format::{OutputFormat, resolve_output_path, write_to_format};

    #[cfg(feature = "telegram")]
    pub use crate::telegram::TelegramClient;
}

//! Unified error types for tgexport.
//!
//! This module provides a single [`TgExportError`] enum that covers every
//! failure of an export run, from bad command-line input to a failed write.
//!
//! # Error Categories
//!
//! - **Input** errors (channel, date, range, format) are raised before any
//!   network interaction.
//! - **Configuration** and **authentication** errors stop the run before
//!   history is requested.
//! - **Client** errors come from the Telegram client library and are fatal
//!   for the current run.
//! - **Write** errors carry the path that could not be written.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for tgexport operations.
///
/// # Example
///
/// ```rust
/// use tgexport::error::Result;
/// use tgexport::ExtractedEntry;
///
/// fn my_function() -> Result<Vec<ExtractedEntry>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, TgExportError>;

/// The error type for all tgexport operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TgExportError {
    /// An I/O error occurred outside of output writing
    /// (reading a prompt, removing stale session files).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The channel reference could not be normalized.
    #[error("Invalid channel '{input}': {message}")]
    InvalidChannel {
        /// The reference as given by the user
        input: String,
        /// What is wrong with it
        message: String,
    },

    /// A date bound could not be parsed.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The start bound lies after the end bound.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Rendered start bound
        start: String,
        /// Rendered end bound
        end: String,
    },

    /// Unknown or unavailable output format.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The kind of format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A configuration value is missing or malformed.
    #[error("Configuration error ({key}): {message}")]
    Config {
        /// The environment key involved
        key: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Authentication failed or no valid session exists.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The channel does not exist or is not visible to this account.
    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    /// The Telegram client reported a transport or protocol failure.
    #[error("Telegram client error: {0}")]
    Client(String),

    /// Writing the export failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// The path that was being written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl TgExportError {
    /// Creates an invalid channel error.
    pub fn invalid_channel(input: impl Into<String>, message: impl Into<String>) -> Self {
        TgExportError::InvalidChannel {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        TgExportError::InvalidDate {
            input: input.into(),
            expected: "DD.MM.YYYY",
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        TgExportError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(key: &'static str, message: impl Into<String>) -> Self {
        TgExportError::Config {
            key,
            message: message.into(),
        }
    }

    /// Creates an authentication error with a hint to run the login flow.
    pub fn not_authorized() -> Self {
        TgExportError::Auth(
            "no valid session found; run `tgexport --auth` to log in first".to_string(),
        )
    }

    /// Wraps any displayable client-library error.
    pub fn client(err: impl std::fmt::Display) -> Self {
        TgExportError::Client(err.to_string())
    }

    /// Creates a write error for the given path.
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TgExportError::Write {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for errors caused by user input.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            TgExportError::InvalidChannel { .. }
                | TgExportError::InvalidDate { .. }
                | TgExportError::InvalidRange { .. }
                | TgExportError::InvalidFormat { .. }
        )
    }

    /// Returns `true` if this is an authentication error.
    pub fn is_auth(&self) -> bool {
        matches!(self, TgExportError::Auth(_))
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, TgExportError::Config { .. })
    }

    /// Returns `true` if this is an output write error.
    pub fn is_write(&self) -> bool {
        matches!(self, TgExportError::Write { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(
            self,
            TgExportError::InvalidDate { .. } | TgExportError::InvalidRange { .. }
        )
    }
}

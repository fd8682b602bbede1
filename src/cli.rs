//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! [`Args::validate`] turns the raw strings into typed values (channel
//! reference, date range) so that bad input is rejected before the client
//! connects.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::channel::ChannelRef;
use crate::core::filter::DateRange;
use crate::core::models::OutputConfig;
use crate::core::pipeline::ExportOptions;
use crate::error::TgExportError;

/// Export a Telegram channel's history to a text or JSON file.
#[derive(Parser, Debug, Clone)]
#[command(name = "tgexport")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    tgexport --auth
    tgexport @rustlang
    tgexport https://t.me/rustlang -s 01.01.2024 -e 31.01.2024
    tgexport rustlang -l 50 --no-links -f json -o rust_jan
    tgexport -- -1001234567890 --scan 500

ENVIRONMENT:
    API_ID, API_HASH    application credentials (required)
    PHONE_NUMBER        phone used by --auth (prompted when unset)
    DATA_DIR            session directory (default: ./data)
    OUTPUT_DIR          base for relative output names (default: Downloads)")]
pub struct Args {
    /// Channel link, @username, username or numeric id
    #[arg(required_unless_present = "auth", allow_negative_numbers = true)]
    pub channel: Option<String>,

    /// Log in interactively and save the session, then exit
    #[arg(long, conflicts_with = "channel")]
    pub auth: bool,

    /// Export messages from this date on (DD.MM.YYYY)
    #[arg(short, long, value_name = "DATE")]
    pub start: Option<String>,

    /// Export messages up to and including this date (DD.MM.YYYY)
    #[arg(short, long, value_name = "DATE")]
    pub end: Option<String>,

    /// Maximum number of exported messages
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    /// Strip links and @mentions from the text
    #[arg(long)]
    pub no_links: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "txt")]
    pub format: OutputFormat,

    /// Output file name without extension; relative names go to OUTPUT_DIR
    #[arg(short, long, default_value = "result")]
    pub output: String,

    /// Read at most this many messages from the channel
    #[arg(long, value_name = "N")]
    pub scan: Option<usize>,

    /// Include message ids in the output
    #[arg(long)]
    pub ids: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything an export run needs, checked and typed.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub channel: ChannelRef,
    pub options: ExportOptions,
    pub format: crate::format::OutputFormat,
    pub output_config: OutputConfig,
}

impl Args {
    /// Validates the export arguments without touching the network.
    ///
    /// # Errors
    ///
    /// Returns an input error for a missing or malformed channel, a
    /// malformed date, or a start date after the end date.
    pub fn validate(&self) -> Result<ExportRequest, TgExportError> {
        let raw_channel = self
            .channel
            .as_deref()
            .ok_or_else(|| TgExportError::invalid_channel("", "no channel given"))?;
        let channel = ChannelRef::parse(raw_channel)?;

        let range = DateRange::parse(self.start.as_deref(), self.end.as_deref())?;

        let mut options = ExportOptions::new()
            .with_range(range)
            .with_strip_links(self.no_links);
        if let Some(limit) = self.limit {
            options = options.with_limit(limit);
        }
        if let Some(scan) = self.scan {
            options = options.with_scan_limit(scan);
        }

        let mut output_config = OutputConfig::new();
        if self.ids {
            output_config = output_config.with_ids();
        }

        Ok(ExportRequest {
            channel,
            options,
            format: self.format.into(),
            output_config,
        })
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Timestamped text with divider lines (default)
    #[default]
    Txt,

    /// JSON array of {date, text} records
    Json,
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Txt => crate::format::OutputFormat::Txt,
            OutputFormat::Json => crate::format::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("tgexport").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["@rustlang"]).unwrap();
        assert_eq!(args.format, OutputFormat::Txt);
        assert_eq!(args.output, "result");
        assert!(args.limit.is_none());
        assert!(!args.no_links);
        assert!(!args.auth);
    }

    #[test]
    fn test_channel_required_without_auth() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--auth"]).is_ok());
    }

    #[test]
    fn test_auth_conflicts_with_channel() {
        assert!(parse(&["--auth", "rustlang"]).is_err());
    }

    #[test]
    fn test_negative_channel_id() {
        let args = parse(&["-1001234567890"]).unwrap();
        let request = args.validate().unwrap();
        assert_eq!(request.channel, ChannelRef::NumericId(-1001234567890));
    }

    #[test]
    fn test_negative_limit_rejected() {
        assert!(parse(&["rustlang", "-l", "-1"]).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(parse(&["rustlang", "-f", "csv"]).is_err());
    }

    #[test]
    fn test_validate_full() {
        let args = parse(&[
            "https://t.me/rustlang",
            "-s",
            "02.01.2024",
            "-e",
            "04.01.2024",
            "-l",
            "2",
            "--no-links",
            "-f",
            "json",
            "--ids",
        ])
        .unwrap();
        let request = args.validate().unwrap();

        assert_eq!(request.channel, ChannelRef::username("rustlang"));
        assert_eq!(request.options.limit, Some(2));
        assert!(request.options.strip_links);
        assert_eq!(request.format, crate::format::OutputFormat::Json);
        assert!(request.output_config.include_ids);
    }

    #[test]
    fn test_validate_bad_date() {
        let args = parse(&["rustlang", "-s", "2024-01-02"]).unwrap();
        let err = args.validate().unwrap_err();
        assert!(err.is_invalid_date());
    }

    #[test]
    fn test_validate_empty_channel() {
        let args = parse(&["  "]).unwrap();
        assert!(args.validate().unwrap_err().is_input());
    }

    #[test]
    fn test_format_into_library() {
        assert_eq!(
            crate::format::OutputFormat::from(OutputFormat::Txt),
            crate::format::OutputFormat::Txt
        );
        assert_eq!(
            crate::format::OutputFormat::from(OutputFormat::Json).extension(),
            "json"
        );
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Json).unwrap();
        assert_eq!(json, "\"json\"");
    }
}

//! Date-bounded history export.
//!
//! [`export_history`] walks a channel newest-first and collects the posts
//! that fall inside a [`DateRange`]:
//!
//! 1. a message **older** than the start bound ends the walk, since every
//!    later message is older still;
//! 2. a message **newer** than the end bound is skipped, older ones may
//!    still qualify;
//! 3. a message inside the range contributes its body or caption, cleaned
//!    by the sanitizer when link stripping is on;
//! 4. the walk also ends once `limit` entries are collected.
//!
//! The early exit in step 1 trusts the source's newest-first ordering. A
//! source that delivers out of order must not be used with a start bound.
//!
//! # Example
//!
//! ```rust
//! use tgexport::core::pipeline::{ExportOptions, export_history};
//! use tgexport::source::MemorySource;
//! use tgexport::channel::ChannelRef;
//! use tgexport::RawMessage;
//! use chrono::Utc;
//!
//! # #[tokio::main]
//! # async fn main() -> tgexport::Result<()> {
//! let source = MemorySource::new(vec![
//!     RawMessage::new(2, Utc::now()).with_body("Release notes: https://example.com"),
//!     RawMessage::new(1, Utc::now()),
//! ]);
//!
//! let options = ExportOptions::new().with_strip_links(true);
//! let result = export_history(&source, &ChannelRef::username("news"), &options).await?;
//!
//! assert_eq!(result.entries.len(), 1);
//! assert_eq!(result.entries[0].text, "Release notes:");
//! # Ok(())
//! # }
//! ```

use std::fmt;

use tracing::{debug, info};

use super::extract::extract_text;
use super::filter::DateRange;
use super::models::ExtractedEntry;
use super::sanitize::sanitize_text;
use crate::channel::ChannelRef;
use crate::error::Result;
use crate::source::{HistoryCursor, HistorySource};

/// Options for one export run.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Inclusive date bounds.
    pub range: DateRange,

    /// Maximum number of exported entries; `None` is unbounded.
    pub limit: Option<usize>,

    /// Remove links and mentions from exported text.
    pub strip_links: bool,

    /// Maximum number of raw messages to process. One extra message may be
    /// fetched to tell whether history continues past the cap.
    pub scan_limit: Option<usize>,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_strip_links(mut self, strip: bool) -> Self {
        self.strip_links = strip;
        self
    }

    #[must_use]
    pub fn with_scan_limit(mut self, scan: usize) -> Self {
        self.scan_limit = Some(scan);
        self
    }
}

/// Why the history walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopReason {
    /// The channel had no more messages.
    #[default]
    Exhausted,
    /// `limit` entries were collected.
    LimitReached,
    /// A message older than the start bound was reached.
    BeforeStart,
    /// The scan cap was used up before history ran out.
    ScanCapReached,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Exhausted => write!(f, "end of history"),
            StopReason::LimitReached => write!(f, "limit reached"),
            StopReason::BeforeStart => write!(f, "reached start date"),
            StopReason::ScanCapReached => write!(f, "scan cap reached"),
        }
    }
}

/// Counters collected during one export run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Messages pulled from the source.
    pub scanned: usize,
    /// Messages newer than the end bound.
    pub skipped_newer: usize,
    /// In-range messages with no body or caption.
    pub without_text: usize,
    /// Entries exported.
    pub kept: usize,
    pub stop: StopReason,
}

/// The ordered entries of one run, newest first, plus run statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportResult {
    pub entries: Vec<ExtractedEntry>,
    pub stats: ExportStats,
}

impl ExportResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Exports a channel's history according to `options`.
///
/// Messages are fetched strictly one after another; nothing is written
/// anywhere. A source error aborts the run and discards what was collected.
pub async fn export_history<S>(
    source: &S,
    channel: &ChannelRef,
    options: &ExportOptions,
) -> Result<ExportResult>
where
    S: HistorySource + ?Sized,
{
    let resolved = source.resolve(channel).await?;
    // One message past the cap tells a used-up cap apart from a history
    // that ended exactly there.
    let upstream = options.scan_limit.map(|cap| cap.saturating_add(1));
    let mut cursor = source.history(&resolved, upstream).await?;

    let mut result = ExportResult::default();

    if options.limit == Some(0) {
        debug!(%channel, "limit is zero, not reading history");
        result.stats.stop = StopReason::LimitReached;
        return Ok(result);
    }

    let range = &options.range;
    loop {
        if options
            .scan_limit
            .is_some_and(|cap| result.stats.scanned >= cap)
        {
            result.stats.stop = if cursor.next_message().await?.is_some() {
                StopReason::ScanCapReached
            } else {
                StopReason::Exhausted
            };
            debug!(scanned = result.stats.scanned, stop = %result.stats.stop, "scan cap used up");
            break;
        }

        let Some(msg) = cursor.next_message().await? else {
            result.stats.stop = StopReason::Exhausted;
            break;
        };
        result.stats.scanned += 1;

        if range.is_before_start(msg.timestamp) {
            debug!(id = msg.id, date = %msg.timestamp, "message predates start bound, stopping");
            result.stats.stop = StopReason::BeforeStart;
            break;
        }

        if range.is_after_end(msg.timestamp) {
            result.stats.skipped_newer += 1;
            continue;
        }

        let Some(text) = extract_text(&msg) else {
            result.stats.without_text += 1;
            continue;
        };

        let text = sanitize_text(text, options.strip_links);
        result
            .entries
            .push(ExtractedEntry::new(msg.timestamp, text).with_id(msg.id));

        if options.limit.is_some_and(|limit| result.entries.len() >= limit) {
            debug!(limit = ?options.limit, "entry limit reached, stopping");
            result.stats.stop = StopReason::LimitReached;
            break;
        }
    }

    result.stats.kept = result.entries.len();
    info!(
        source = source.name(),
        %channel,
        scanned = result.stats.scanned,
        kept = result.stats.kept,
        stop = %result.stats.stop,
        "history export finished"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::RawMessage;
    use crate::source::MemorySource;
    use chrono::{DateTime, Local, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(2024, 1, d, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn five_days() -> Vec<RawMessage> {
        (1..=5)
            .rev()
            .map(|d| RawMessage::new(i64::from(d), day(d)).with_body(format!("day {d}")))
            .collect()
    }

    fn channel() -> ChannelRef {
        ChannelRef::username("test")
    }

    #[tokio::test]
    async fn test_unbounded_exports_everything() {
        let source = MemorySource::new(five_days());
        let result = export_history(&source, &channel(), &ExportOptions::new())
            .await
            .unwrap();

        assert_eq!(result.len(), 5);
        assert_eq!(result.entries[0].text, "day 5");
        assert_eq!(result.stats.stop, StopReason::Exhausted);
    }

    #[tokio::test]
    async fn test_bounded_range_stops_early() {
        let source = MemorySource::new(five_days());
        let range = DateRange::parse(Some("02.01.2024"), Some("04.01.2024")).unwrap();
        let options = ExportOptions::new().with_range(range);

        let result = export_history(&source, &channel(), &options).await.unwrap();

        let texts: Vec<_> = result.entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["day 4", "day 3", "day 2"]);
        assert_eq!(result.stats.skipped_newer, 1);
        assert_eq!(result.stats.stop, StopReason::BeforeStart);
        // day 1 is pulled to discover the bound, nothing after it
        assert_eq!(source.pulled(), 5);
    }

    #[tokio::test]
    async fn test_zero_limit() {
        let source = MemorySource::new(five_days());
        let options = ExportOptions::new().with_limit(0);
        let result = export_history(&source, &channel(), &options).await.unwrap();

        assert!(result.is_empty());
        assert_eq!(source.pulled(), 0);
    }

    #[tokio::test]
    async fn test_textless_messages_skipped() {
        let source = MemorySource::new(vec![
            RawMessage::new(3, day(3)).with_caption("photo caption"),
            RawMessage::new(2, day(2)),
            RawMessage::new(1, day(1)).with_body("text"),
        ]);
        let result = export_history(&source, &channel(), &ExportOptions::new())
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.entries[0].text, "photo caption");
        assert_eq!(result.entries[0].id, Some(3));
        assert_eq!(result.stats.without_text, 1);
    }

    #[tokio::test]
    async fn test_scan_cap() {
        let source = MemorySource::new(five_days());
        let options = ExportOptions::new().with_scan_limit(2);
        let result = export_history(&source, &channel(), &options).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.stats.scanned, 2);
        assert_eq!(result.stats.stop, StopReason::ScanCapReached);
    }

    #[tokio::test]
    async fn test_history_ending_at_scan_cap_is_exhausted() {
        let source = MemorySource::new(five_days());
        let options = ExportOptions::new().with_scan_limit(5);
        let result = export_history(&source, &channel(), &options).await.unwrap();

        assert_eq!(result.len(), 5);
        assert_eq!(result.stats.scanned, 5);
        assert_eq!(result.stats.stop, StopReason::Exhausted);
    }

    #[tokio::test]
    async fn test_empty_channel() {
        let source = MemorySource::new(vec![]);
        let result = export_history(&source, &channel(), &ExportOptions::new())
            .await
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.stats.stop, StopReason::Exhausted);
    }
}

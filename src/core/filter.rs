//! Date bounds for an export run.
//!
//! This module provides [`DateRange`], parsed from the `DD.MM.YYYY` strings
//! given on the command line.
//!
//! # Bounds
//!
//! | Bound | Given as | Resolves to | Default |
//! |-------|----------|-------------|---------|
//! | start | `DD.MM.YYYY` | local midnight of that day | Unix epoch |
//! | end | `DD.MM.YYYY` | local 23:59:59 of that day | now |
//!
//! Both bounds are inclusive.
//!
//! # Examples
//!
//! ```
//! use tgexport::core::filter::DateRange;
//! use chrono::{Local, TimeZone, Utc};
//!
//! # fn main() -> tgexport::Result<()> {
//! let range = DateRange::parse(Some("02.01.2024"), Some("04.01.2024"))?;
//!
//! let inside = Local.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap().with_timezone(&Utc);
//! let before = Local.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap().with_timezone(&Utc);
//!
//! assert!(range.contains(inside));
//! assert!(range.is_before_start(before));
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::TgExportError;

/// Input format for date bounds.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Inclusive timestamp range `start ..= end`.
///
/// Constructed with [`DateRange::parse`], which guarantees `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    /// Parses optional `DD.MM.YYYY` bounds.
    ///
    /// A missing start means the Unix epoch, a missing end means the current
    /// moment.
    ///
    /// # Errors
    ///
    /// Returns [`TgExportError::InvalidDate`] for a malformed string and
    /// [`TgExportError::InvalidRange`] when start falls after end.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, TgExportError> {
        let start = match start {
            Some(s) => parse_day_start(s)?,
            None => DateTime::UNIX_EPOCH,
        };
        let end = match end {
            Some(s) => parse_day_end(s)?,
            None => Utc::now(),
        };
        Self::new(start, end)
    }

    /// Creates a range from explicit timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`TgExportError::InvalidRange`] when `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TgExportError> {
        if start > end {
            return Err(TgExportError::InvalidRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// A range from the epoch to now.
    pub fn unbounded() -> Self {
        Self {
            start: DateTime::UNIX_EPOCH,
            end: Utc::now(),
        }
    }

    /// Replaces the start bound.
    pub fn with_start(self, start: DateTime<Utc>) -> Result<Self, TgExportError> {
        Self::new(start, self.end)
    }

    /// Replaces the end bound.
    pub fn with_end(self, end: DateTime<Utc>) -> Result<Self, TgExportError> {
        Self::new(self.start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// `start <= ts <= end`.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        !self.is_before_start(ts) && !self.is_after_end(ts)
    }

    /// `ts < start`.
    pub fn is_before_start(&self, ts: DateTime<Utc>) -> bool {
        ts < self.start
    }

    /// `ts > end`.
    pub fn is_after_end(&self, ts: DateTime<Utc>) -> bool {
        ts > self.end
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Parses `DD.MM.YYYY` to local midnight of that day.
pub fn parse_day_start(date_str: &str) -> Result<DateTime<Utc>, TgExportError> {
    let day = parse_day(date_str)?;
    local_to_utc(date_str, day.and_time(NaiveTime::MIN))
}

/// Parses `DD.MM.YYYY` to the last second of that day, local time.
pub fn parse_day_end(date_str: &str) -> Result<DateTime<Utc>, TgExportError> {
    let day = parse_day(date_str)?;
    let last_second = NaiveTime::from_hms_opt(23, 59, 59)
        .ok_or_else(|| TgExportError::invalid_date(date_str))?;
    local_to_utc(date_str, day.and_time(last_second))
}

fn parse_day(date_str: &str) -> Result<NaiveDate, TgExportError> {
    NaiveDate::parse_from_str(date_str.trim(), DATE_FORMAT)
        .map_err(|_| TgExportError::invalid_date(date_str))
}

fn local_to_utc(date_str: &str, naive: NaiveDateTime) -> Result<DateTime<Utc>, TgExportError> {
    // A DST gap can swallow the exact local time; the earliest valid instant wins.
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| TgExportError::invalid_date(date_str))
}

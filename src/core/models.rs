//! Core data models for channel messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message as delivered by a [`HistorySource`](crate::source::HistorySource).
///
/// Only lives for the duration of one pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    /// Message id within the channel; grows with time.
    pub id: i64,
    /// When the message was posted.
    pub timestamp: DateTime<Utc>,
    /// Message text, for plain text posts.
    pub body: Option<String>,
    /// Caption attached to a media post.
    pub caption: Option<String>,
}

impl RawMessage {
    /// Creates a message with neither body nor caption.
    pub fn new(id: i64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            timestamp,
            body: None,
            caption: None,
        }
    }

    /// Builder-style method to set the body text.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Builder-style method to set the caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// One exported message: when it was posted and its cleaned text.
///
/// Serializes as `{"date": "<RFC 3339>", "text": "...", "id": 42}`, with `id`
/// omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntry {
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,

    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub id: Option<i64>,
}

impl ExtractedEntry {
    pub fn new(timestamp: DateTime<Utc>, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: text.into(),
            id: None,
        }
    }

    /// Builder-style method to set the source message id.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Configuration for output rendering.
/// Controls which optional fields end up in the export.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Include source message ids (JSON output)
    pub include_ids: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.include_ids = true;
        self
    }
}

//! The seam between the export pipeline and a Telegram client.
//!
//! The pipeline needs exactly two things from a client: turn a
//! [`ChannelRef`] into something it can read from, and walk that channel's
//! history newest-first. [`HistorySource`] and [`HistoryCursor`] describe
//! those two capabilities, so the pipeline can run against the real
//! client ([`TelegramClient`](crate::telegram::TelegramClient)) or against
//! [`MemorySource`] in tests.
//!
//! # Example
//!
//! ```rust
//! use tgexport::source::{HistoryCursor, HistorySource, MemorySource};
//! use tgexport::channel::ChannelRef;
//! use tgexport::RawMessage;
//! use chrono::Utc;
//!
//! # #[tokio::main]
//! # async fn main() -> tgexport::Result<()> {
//! let source = MemorySource::new(vec![
//!     RawMessage::new(2, Utc::now()).with_body("newer"),
//!     RawMessage::new(1, Utc::now()).with_body("older"),
//! ]);
//!
//! let channel = source.resolve(&ChannelRef::username("news")).await?;
//! let mut cursor = source.history(&channel, None).await?;
//! while let Some(msg) = cursor.next_message().await? {
//!     println!("{}", msg.id);
//! }
//! assert_eq!(source.pulled(), 2);
//! # Ok(())
//! # }
//! ```

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::channel::ChannelRef;
use crate::core::models::RawMessage;
use crate::error::{Result, TgExportError};

/// A client that can resolve channels and open their history.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Resolved channel handle.
    type Channel: Send + Sync;

    /// Iterator over one channel's history.
    type Cursor: HistoryCursor;

    /// Returns the name of the source, for log lines.
    fn name(&self) -> &'static str;

    /// Looks up a channel.
    ///
    /// Returns [`TgExportError::ChannelNotFound`] when the reference does not
    /// name a chat visible to this client.
    async fn resolve(&self, channel: &ChannelRef) -> Result<Self::Channel>;

    /// Opens the channel's history, newest message first.
    ///
    /// `limit` caps how many messages the cursor will yield in total.
    async fn history(&self, channel: &Self::Channel, limit: Option<usize>)
    -> Result<Self::Cursor>;
}

/// Newest-first iterator over a channel's messages.
///
/// Timestamps never increase from one message to the next.
#[async_trait]
pub trait HistoryCursor: Send {
    /// Fetches the next message, or `None` once history is exhausted.
    async fn next_message(&mut self) -> Result<Option<RawMessage>>;
}

/// An in-memory [`HistorySource`] over a fixed message list.
///
/// Messages must be given newest first. Every call to
/// [`HistoryCursor::next_message`] that returns a message is counted, which
/// lets tests observe how far the pipeline read.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    messages: Vec<RawMessage>,
    known: Option<Vec<ChannelRef>>,
    pulled: Arc<AtomicUsize>,
}

impl MemorySource {
    /// Creates a source that resolves any channel to `messages`.
    pub fn new(messages: Vec<RawMessage>) -> Self {
        Self {
            messages,
            known: None,
            pulled: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Restricts resolution to the given channel; others are "not found".
    #[must_use]
    pub fn with_channel(mut self, channel: ChannelRef) -> Self {
        self.known.get_or_insert_with(Vec::new).push(channel);
        self
    }

    /// Number of messages handed out so far, across all cursors.
    pub fn pulled(&self) -> usize {
        self.pulled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistorySource for MemorySource {
    type Channel = ChannelRef;
    type Cursor = MemoryCursor;

    fn name(&self) -> &'static str {
        "memory"
    }

    async fn resolve(&self, channel: &ChannelRef) -> Result<ChannelRef> {
        match &self.known {
            Some(known) if !known.contains(channel) => {
                Err(TgExportError::ChannelNotFound(channel.to_string()))
            }
            _ => Ok(channel.clone()),
        }
    }

    async fn history(&self, _channel: &ChannelRef, limit: Option<usize>) -> Result<MemoryCursor> {
        let take = limit.unwrap_or(self.messages.len());
        Ok(MemoryCursor {
            queue: self.messages.iter().take(take).cloned().collect(),
            pulled: Arc::clone(&self.pulled),
        })
    }
}

/// Cursor returned by [`MemorySource`].
#[derive(Debug)]
pub struct MemoryCursor {
    queue: VecDeque<RawMessage>,
    pulled: Arc<AtomicUsize>,
}

#[async_trait]
impl HistoryCursor for MemoryCursor {
    async fn next_message(&mut self) -> Result<Option<RawMessage>> {
        let next = self.queue.pop_front();
        if next.is_some() {
            self.pulled.fetch_add(1, Ordering::SeqCst);
        }
        Ok(next)
    }
}

//! Telegram client adapter.
//!
//! [`TelegramClient`] implements [`HistorySource`] on top of the `grammers`
//! MTProto client. Everything protocol-related (transport, encryption,
//! flood-wait handling, pagination) happens inside `grammers`; this module
//! only maps between its types and ours.
//!
//! # Example
//!
//! ```rust,no_run
//! use tgexport::channel::ChannelRef;
//! use tgexport::config::ClientConfig;
//! use tgexport::core::pipeline::{ExportOptions, export_history};
//! use tgexport::telegram::TelegramClient;
//!
//! # #[tokio::main]
//! # async fn main() -> tgexport::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let client = TelegramClient::connect(&config).await?;
//! client.ensure_authorized().await?;
//!
//! let channel = ChannelRef::parse("@rustlang")?;
//! let result = export_history(&client, &channel, &ExportOptions::new().with_limit(10)).await?;
//! println!("{} posts", result.len());
//! # Ok(())
//! # }
//! ```

use std::fs;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use grammers_client::client::messages::MessageIter;
use grammers_client::types::{Chat, Message};
use grammers_client::{Client, Config, InitParams};
use grammers_session::Session;
use tracing::{debug, info};

use crate::channel::ChannelRef;
use crate::config::ClientConfig;
use crate::core::models::RawMessage;
use crate::error::{Result, TgExportError};
use crate::source::{HistoryCursor, HistorySource};

mod auth;

pub use auth::{bootstrap, remove_session_files};

/// A connected Telegram client.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    config: ClientConfig,
}

impl TelegramClient {
    /// Connects using the session stored under the configured data directory.
    ///
    /// A missing session file yields a fresh, unauthorized session.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;

        let session_path = config.session_path();
        let session = Session::load_file_or_create(&session_path).map_err(|e| {
            TgExportError::Auth(format!(
                "cannot load session {}: {}",
                session_path.display(),
                e
            ))
        })?;

        debug!(api_id = config.api_id, session = %session_path.display(), "connecting");
        let client = Client::connect(Config {
            session,
            api_id: config.api_id,
            api_hash: config.api_hash.clone(),
            params: InitParams::default(),
        })
        .await
        .map_err(TgExportError::client)?;
        info!("connected to Telegram");

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Returns `true` when the session belongs to a logged-in account.
    pub async fn is_authorized(&self) -> Result<bool> {
        self.client
            .is_authorized()
            .await
            .map_err(TgExportError::client)
    }

    /// Fails with [`TgExportError::Auth`] unless the session is logged in.
    pub async fn ensure_authorized(&self) -> Result<()> {
        if self.is_authorized().await? {
            Ok(())
        } else {
            Err(TgExportError::not_authorized())
        }
    }

    /// Persists the session so the next run skips the login.
    pub fn save_session(&self) -> Result<()> {
        let path = self.config.session_path();
        self.client
            .session()
            .save_to_file(&path)
            .map_err(|e| TgExportError::write(path, e))
    }

    async fn find_dialog(&self, channel: &ChannelRef) -> Result<Chat> {
        let wanted = channel
            .bare_id()
            .ok_or_else(|| TgExportError::ChannelNotFound(channel.to_string()))?;

        // Access to a chat by id needs its access hash, which only the
        // dialog list hands out.
        let mut dialogs = self.client.iter_dialogs();
        while let Some(dialog) = dialogs.next().await.map_err(TgExportError::client)? {
            if dialog.chat().id() == wanted {
                return Ok(dialog.chat().clone());
            }
        }

        Err(TgExportError::ChannelNotFound(format!(
            "{} (numeric ids only resolve for chats this account has joined)",
            channel
        )))
    }
}

#[async_trait]
impl HistorySource for TelegramClient {
    type Channel = Chat;
    type Cursor = TelegramCursor;

    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn resolve(&self, channel: &ChannelRef) -> Result<Chat> {
        let chat = match channel {
            ChannelRef::Username(name) => self
                .client
                .resolve_username(name)
                .await
                .map_err(TgExportError::client)?
                .ok_or_else(|| TgExportError::ChannelNotFound(channel.to_string()))?,
            ChannelRef::NumericId(_) => self.find_dialog(channel).await?,
        };

        info!(%channel, id = chat.id(), title = chat.name(), "channel resolved");
        Ok(chat)
    }

    async fn history(&self, channel: &Chat, limit: Option<usize>) -> Result<TelegramCursor> {
        let mut iter = self.client.iter_messages(channel.pack());
        if let Some(limit) = limit {
            iter = iter.limit(limit);
        }
        Ok(TelegramCursor { iter })
    }
}

/// Newest-first cursor over a channel, backed by `grammers`' message iterator.
pub struct TelegramCursor {
    iter: MessageIter,
}

#[async_trait]
impl HistoryCursor for TelegramCursor {
    async fn next_message(&mut self) -> Result<Option<RawMessage>> {
        let next = self.iter.next().await.map_err(TgExportError::client)?;
        Ok(next.as_ref().map(to_raw_message))
    }
}

/// Media posts keep their text in the caption slot.
///
/// The text is taken as markdown so formatting and inline links survive.
fn to_raw_message(msg: &Message) -> RawMessage {
    raw_from_parts(
        i64::from(msg.id()),
        msg.date(),
        msg.markdown_text(),
        msg.media().is_some(),
    )
}

fn raw_from_parts(id: i64, date: DateTime<Utc>, text: String, has_media: bool) -> RawMessage {
    let raw = RawMessage::new(id, date);
    if text.trim().is_empty() {
        raw
    } else if has_media {
        raw.with_caption(text)
    } else {
        raw.with_body(text)
    }
}

//! Channel reference normalization.
//!
//! Users name channels in several ways: a link copied from the app, an
//! `@handle`, a bare username, or a numeric id taken from a bot or an older
//! export. [`ChannelRef::parse`] reduces all of them to one canonical form
//! before any network interaction happens.
//!
//! # Examples
//!
//! ```
//! use tgexport::channel::ChannelRef;
//!
//! # fn main() -> tgexport::Result<()> {
//! assert_eq!(ChannelRef::parse("https://t.me/durov")?, ChannelRef::username("durov"));
//! assert_eq!(ChannelRef::parse("@durov")?, ChannelRef::username("durov"));
//! assert_eq!(ChannelRef::parse("-1001006503122")?, ChannelRef::NumericId(-1001006503122));
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TgExportError;

/// Bot-API style ids for channels and supergroups are `-100` followed by the
/// bare channel id, so every such id is below this value.
pub const CHANNEL_ID_THRESHOLD: i64 = -1_000_000_000_000;

/// Hosts whose links point at a Telegram chat.
const TELEGRAM_HOSTS: &[&str] = &["t.me", "telegram.me", "telegram.dog"];

/// Deep link form of a public username.
const RESOLVE_SCHEME: &str = "tg://resolve";

const INVITE_REASON: &str = "invite links cannot be resolved; use the channel's @username or id";

/// A canonical reference to a channel, ready for the client to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelRef {
    /// Public username, without the leading `@`.
    Username(String),
    /// Numeric chat id, passed through as given.
    NumericId(i64),
}

impl ChannelRef {
    /// Creates a username reference.
    pub fn username(name: impl Into<String>) -> Self {
        ChannelRef::Username(name.into())
    }

    /// Normalizes a user-supplied channel reference.
    ///
    /// # Errors
    ///
    /// Returns [`TgExportError::InvalidChannel`] for empty input, a bare `@`,
    /// a link with no path segment, or a private invite link
    /// (`t.me/+hash`, `t.me/joinchat/hash`).
    pub fn parse(input: &str) -> Result<Self, TgExportError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TgExportError::invalid_channel(
                input,
                "channel reference is empty",
            ));
        }

        if let Some(query) = strip_resolve_prefix(trimmed) {
            return username_from_resolve(input, query);
        }

        if let Some(rest) = strip_link_prefix(trimmed) {
            return username_from_path(input, rest);
        }

        if let Some(name) = trimmed.strip_prefix('@') {
            let name = name.trim();
            if name.is_empty() {
                return Err(TgExportError::invalid_channel(input, "username is empty"));
            }
            return Ok(ChannelRef::username(name));
        }

        if let Ok(id) = trimmed.parse::<i64>() {
            return Ok(ChannelRef::NumericId(id));
        }

        if trimmed.starts_with('+') {
            return Err(TgExportError::invalid_channel(input, INVITE_REASON));
        }

        Ok(ChannelRef::username(trimmed))
    }

    /// Returns `true` when this is a Bot-API channel id (`-100…`).
    pub fn is_channel_id(&self) -> bool {
        matches!(self, ChannelRef::NumericId(id) if *id < CHANNEL_ID_THRESHOLD)
    }

    /// Returns the bare id the MTProto layer uses for this chat.
    ///
    /// `-100` channel ids lose their prefix, other negative ids (basic groups)
    /// lose their sign, positive ids are already bare. Usernames have none.
    pub fn bare_id(&self) -> Option<i64> {
        match self {
            ChannelRef::Username(_) => None,
            ChannelRef::NumericId(id) if *id < CHANNEL_ID_THRESHOLD => {
                Some(-(id - CHANNEL_ID_THRESHOLD))
            }
            ChannelRef::NumericId(id) => Some(id.abs()),
        }
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelRef::Username(name) => write!(f, "@{}", name),
            ChannelRef::NumericId(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for ChannelRef {
    type Err = TgExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelRef::parse(s)
    }
}

/// Strips scheme and Telegram host, returning the path part of a link.
fn strip_link_prefix(input: &str) -> Option<&str> {
    let lower = input.to_ascii_lowercase();
    let scheme_len = ["https://", "http://"]
        .iter()
        .find(|scheme| lower.starts_with(*scheme))
        .map_or(0, |scheme| scheme.len());

    let after_scheme = &input[scheme_len..];
    let after_scheme_lower = &lower[scheme_len..];
    let after_www = if after_scheme_lower.starts_with("www.") {
        &after_scheme[4..]
    } else {
        after_scheme
    };
    let after_www_lower = after_www.to_ascii_lowercase();

    for host in TELEGRAM_HOSTS {
        if after_www_lower == *host {
            return Some("");
        }
        if after_www_lower.starts_with(host) && after_www[host.len()..].starts_with('/') {
            return Some(&after_www[host.len() + 1..]);
        }
    }

    // A link with a scheme but an unknown host still names its first segment.
    if scheme_len > 0 {
        return Some(after_scheme.split_once('/').map_or("", |(_, path)| path));
    }

    None
}

/// Returns the query string of a `tg://resolve` deep link.
fn strip_resolve_prefix(input: &str) -> Option<&str> {
    let head = input.get(..RESOLVE_SCHEME.len())?;
    if !head.eq_ignore_ascii_case(RESOLVE_SCHEME) {
        return None;
    }
    let rest = &input[RESOLVE_SCHEME.len()..];
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix('?')
}

fn username_from_resolve(input: &str, query: &str) -> Result<ChannelRef, TgExportError> {
    let query = query.split('#').next().unwrap_or("");
    let domain = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "domain")
        .map(|(_, value)| value.trim_start_matches('@'));

    match domain {
        Some(name) if !name.is_empty() => Ok(ChannelRef::username(name)),
        _ => Err(TgExportError::invalid_channel(
            input,
            "deep link has no domain parameter",
        )),
    }
}

fn username_from_path(input: &str, path: &str) -> Result<ChannelRef, TgExportError> {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let mut segments = path.split('/').filter(|s| !s.is_empty());

    let mut segment = segments.next();
    // t.me/s/<name> is the public web preview of a channel
    if segment == Some("s") {
        segment = segments.next();
    }

    match segment {
        Some("joinchat") => Err(TgExportError::invalid_channel(input, INVITE_REASON)),
        Some(name) if name.starts_with('+') => {
            Err(TgExportError::invalid_channel(input, INVITE_REASON))
        }
        Some(name) => {
            let name = name.trim_start_matches('@');
            if name.is_empty() {
                Err(TgExportError::invalid_channel(input, "link has no channel name"))
            } else {
                Ok(ChannelRef::username(name))
            }
        }
        None => Err(TgExportError::invalid_channel(
            input,
            "link has no channel name",
        )),
    }
}

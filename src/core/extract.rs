//! Text extraction from raw messages.
//!
//! A channel post carries its text either as the message body or, for media
//! posts, as a caption. Posts with neither (stickers, bare photos, service
//! messages) have nothing to export.

use super::models::RawMessage;

/// Returns the body if it has visible text, else the caption if it has
/// visible text, else `None`.
///
/// `None` is not an error: the pipeline skips such messages.
///
/// # Example
///
/// ```
/// use tgexport::core::extract::extract_text;
/// use tgexport::core::models::RawMessage;
/// use chrono::Utc;
///
/// let photo = RawMessage::new(1, Utc::now()).with_caption("sunset");
/// assert_eq!(extract_text(&photo), Some("sunset"));
///
/// let sticker = RawMessage::new(2, Utc::now());
/// assert_eq!(extract_text(&sticker), None);
/// ```
pub fn extract_text(msg: &RawMessage) -> Option<&str> {
    non_blank(msg.body.as_deref()).or_else(|| non_blank(msg.caption.as_deref()))
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

//! Link and mention stripping.
//!
//! Channel posts are often padded with promo links and `@handles`. With
//! `--no-links` these are removed before export:
//!
//! | Pattern | Example |
//! |---------|---------|
//! | URL with scheme | `https://example.com/a?b=c` |
//! | Telegram link without scheme | `t.me/somechannel`, `telegram.me/joinchat/…` |
//! | `www.` host | `www.example.com` |
//! | Mention | `@somechannel` |
//! | Markdown link | `[label](https://example.com)` keeps `label` |
//!
//! Removal leaves a space behind; afterwards spaces collapse, lines are
//! trimmed and runs of blank lines shrink to one.
//!
//! # Example
//!
//! ```
//! use tgexport::core::sanitize::sanitize_text;
//!
//! let post = "Big news!  Read more: https://example.com/post via @newsbot";
//! assert_eq!(sanitize_text(post, true), "Big news! Read more: via");
//! assert_eq!(sanitize_text(post, false), post);
//! ```

use std::sync::LazyLock;

use regex::Regex;

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b[a-z][a-z0-9+.\-]*://\S+|\b(?:www\.)?(?:t\.me|telegram\.me|telegram\.dog)/\S*|\bwww\.\S+",
    )
    .expect("link pattern is valid")
});

// Markdown rendering of inline links; the label stays, the target goes.
static MARKDOWN_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]\n]*)\]\([^()\s]*\)").expect("markdown link pattern is valid")
});

// `\B` keeps e-mail addresses (`user@host`) intact.
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\B@\w+").expect("mention pattern is valid"));

/// Strips links and mentions when `strip_links` is set; otherwise returns the
/// text unchanged.
///
/// The result is stable: sanitizing it again changes nothing.
pub fn sanitize_text(text: &str, strip_links: bool) -> String {
    if !strip_links {
        return text.to_string();
    }

    // Removing one token can expose another at the new token boundary
    // (`@a@b` -> `@b`), so strip until nothing matches.
    let mut current = normalize_whitespace(&strip_once(text));
    loop {
        let next = normalize_whitespace(&strip_once(&current));
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Returns `true` if the text contains anything [`sanitize_text`] would remove.
pub fn has_links(text: &str) -> bool {
    MARKDOWN_LINK_RE.is_match(text) || LINK_RE.is_match(text) || MENTION_RE.is_match(text)
}

fn strip_once(text: &str) -> String {
    let labels = MARKDOWN_LINK_RE.replace_all(text, "$1");
    let without_links = LINK_RE.replace_all(&labels, " ");
    MENTION_RE.replace_all(&without_links, " ").into_owned()
}

/// Collapses horizontal whitespace, trims every line, keeps at most one
/// blank line in a row and drops leading/trailing blank lines.
fn normalize_whitespace(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in text.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() && lines.last().is_none_or(|l| l.is_empty()) {
            continue;
        }
        lines.push(collapsed);
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

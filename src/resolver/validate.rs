//! Strict share URL acceptance for admin writes.
//!
//! Accepted shapes, with optional `http(s)://` and optional `www.`:
//!
//! ```text
//! youtube.com/watch?v=<11 chars>
//! youtube.com/embed/<11 chars>
//! youtu.be/<11 chars>
//! ```
//!
//! The id alphabet is `[a-zA-Z0-9_-]`. Anything after the id is ignored.

use thiserror::Error;

use super::patterns::NamedPattern;

static SHARE_URL: NamedPattern = NamedPattern::new(
    "share_url",
    r"^(?:https?://)?(?:www\.)?(?:youtube\.com/(?:watch\?v=|embed/)|youtu\.be/)([a-zA-Z0-9_-]{11})",
);

/// Why a share URL was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error(
        "Not a valid YouTube share link: {0} (expected https://www.youtube.com/watch?v=VIDEO_ID or https://youtu.be/VIDEO_ID)"
    )]
    NotShareLink(String),
}

/// Check a URL against the strict share-link shape and return its video id
pub fn validate_share_url(url: &str) -> Result<&str, UrlValidationError> {
    if url.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    SHARE_URL
        .capture(url)
        .ok_or_else(|| UrlValidationError::NotShareLink(url.to_string()))
}

/// Whether a URL passes the strict share-link check
pub fn is_valid_share_url(url: &str) -> bool {
    SHARE_URL.is_match(url)
}

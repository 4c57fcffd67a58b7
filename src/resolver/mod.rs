//! Share URL to embeddable reference resolution.
//!
//! Resolution never fails: a URL that yields no video id is passed
//! through unchanged, and the player surface decides whether it loads.
//! The stricter acceptance check for admin writes lives in [`validate`].

mod patterns;
pub mod validate;

use tracing::debug;

use patterns::NamedPattern;

pub use validate::{is_valid_share_url, validate_share_url, UrlValidationError};

/// Host every extracted video id is embedded from
pub const EMBED_HOST: &str = "www.youtube.com";

/// Query appended to every embed URL
pub const EMBED_QUERY: &str = "autoplay=1&mute=1";

/// Host markers of the secondary sharing platform (passed through as-is)
pub const SECONDARY_HOST_MARKERS: &[&str] = &["facebook.com", "fb.watch"];

/// Id extraction attempts, tried in order; the first capture wins
static VIDEO_ID_PATTERNS: [NamedPattern; 3] = [
    NamedPattern::new("watch_or_short", r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&]+)"),
    NamedPattern::new("embed", r"youtube\.com/embed/([^&]+)"),
    NamedPattern::new("short", r"youtu\.be/([^&]+)"),
];

/// How a reference was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedKind {
    /// Video id extracted and rewritten to an embed URL
    YouTube,

    /// Secondary platform link, passed through unchanged
    Facebook,

    /// Unrecognized link, passed through unchanged
    Unknown,
}

impl EmbedKind {
    /// Whether the reference is expected to load in the player
    pub fn is_embeddable(&self) -> bool {
        matches!(self, EmbedKind::YouTube)
    }
}

impl std::fmt::Display for EmbedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbedKind::YouTube => write!(f, "youtube"),
            EmbedKind::Facebook => write!(f, "facebook"),
            EmbedKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A reference the player surface can be pointed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedRef {
    /// URL handed to the player
    pub url: String,

    /// How the URL was derived
    pub kind: EmbedKind,

    /// Extracted video id, for [`EmbedKind::YouTube`] only
    pub video_id: Option<String>,
}

/// Extract a video id using the ordered pattern attempts
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID_PATTERNS.iter().find_map(|pattern| {
        let id = pattern.capture(url)?;
        debug!(pattern = pattern.name, id, "Video id extracted");
        Some(id)
    })
}

/// Build the embed URL for a video id
pub fn embed_url(video_id: &str) -> String {
    format!("https://{}/embed/{}?{}", EMBED_HOST, video_id, EMBED_QUERY)
}

/// Resolve a share URL into an embeddable reference.
///
/// Returns `None` only for blank input. Pass-through references keep the
/// input exactly as given.
pub fn resolve(source_url: &str) -> Option<EmbedRef> {
    let trimmed = source_url.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(video_id) = extract_video_id(trimmed) {
        return Some(EmbedRef {
            url: embed_url(video_id),
            kind: EmbedKind::YouTube,
            video_id: Some(video_id.to_string()),
        });
    }

    let kind = if is_secondary_host(trimmed) {
        EmbedKind::Facebook
    } else {
        EmbedKind::Unknown
    };
    debug!(url = source_url, %kind, "No video id, passing URL through");

    Some(EmbedRef {
        url: source_url.to_string(),
        kind,
        video_id: None,
    })
}

/// Resolve an optional URL; absent input behaves like empty input
pub fn resolve_opt(source_url: Option<&str>) -> Option<EmbedRef> {
    source_url.and_then(resolve)
}

/// Whether the URL's host belongs to the secondary sharing platform
fn is_secondary_host(source_url: &str) -> bool {
    match url::Url::parse(source_url) {
        Ok(parsed) => parsed
            .host_str()
            .is_some_and(|host| SECONDARY_HOST_MARKERS.iter().any(|m| host.contains(m))),
        // Scheme-less input: fall back to a plain substring check
        Err(_) => SECONDARY_HOST_MARKERS.iter().any(|m| source_url.contains(m)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        let resolved = resolve("https://www.youtube.com/watch?v=oygGdlm6T8I").unwrap();
        assert_eq!(
            resolved.url,
            "https://www.youtube.com/embed/oygGdlm6T8I?autoplay=1&mute=1"
        );
        assert_eq!(resolved.kind, EmbedKind::YouTube);
        assert_eq!(resolved.video_id.as_deref(), Some("oygGdlm6T8I"));
    }

    #[test]
    fn test_watch_url_stops_at_ampersand() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=xMfA6T3fBkE&t=42s"),
            Some("xMfA6T3fBkE")
        );
    }

    #[test]
    fn test_short_url() {
        let resolved = resolve("https://youtu.be/abc12345678").unwrap();
        assert_eq!(
            resolved.url,
            "https://www.youtube.com/embed/abc12345678?autoplay=1&mute=1"
        );
    }

    #[test]
    fn test_embed_url_is_re_embedded() {
        let resolved = resolve("https://www.youtube.com/embed/abc12345678").unwrap();
        assert_eq!(resolved.video_id.as_deref(), Some("abc12345678"));
        assert_eq!(
            resolved.url,
            "https://www.youtube.com/embed/abc12345678?autoplay=1&mute=1"
        );
    }

    #[test]
    fn test_watch_pattern_wins_over_embed() {
        // Both patterns could match; the combined watch/short attempt is tried first
        let url = "https://www.youtube.com/watch?v=first&next=youtube.com/embed/second";
        assert_eq!(extract_video_id(url), Some("first"));
    }

    #[test]
    fn test_empty_input() {
        assert!(resolve("").is_none());
        assert!(resolve("   ").is_none());
        assert!(resolve_opt(None).is_none());
    }

    #[test]
    fn test_facebook_passes_through() {
        let url = "https://www.facebook.com/watch/?v=123456";
        let resolved = resolve(url).unwrap();
        assert_eq!(resolved.url, url);
        assert_eq!(resolved.kind, EmbedKind::Facebook);
        assert!(!resolved.kind.is_embeddable());

        assert_eq!(resolve("fb.watch/abcdef").unwrap().kind, EmbedKind::Facebook);
    }

    #[test]
    fn test_facebook_marker_outside_host_is_unknown() {
        let resolved = resolve("https://example.com/?ref=facebook.com").unwrap();
        assert_eq!(resolved.kind, EmbedKind::Unknown);
    }

    #[test]
    fn test_pass_through_keeps_surrounding_whitespace() {
        let resolved = resolve(" https://vimeo.com/1 ").unwrap();
        assert_eq!(resolved.url, " https://vimeo.com/1 ");
        assert_eq!(resolved.kind, EmbedKind::Unknown);

        let resolved = resolve(" https://fb.watch/abc ").unwrap();
        assert_eq!(resolved.url, " https://fb.watch/abc ");
        assert_eq!(resolved.kind, EmbedKind::Facebook);

        let resolved = resolve(" https://youtu.be/abc12345678 ").unwrap();
        assert_eq!(resolved.video_id.as_deref(), Some("abc12345678"));
    }

    #[test]
    fn test_unknown_passes_through() {
        let url = "https://vimeo.com/76979871";
        let resolved = resolve(url).unwrap();
        assert_eq!(resolved.url, url);
        assert_eq!(resolved.kind, EmbedKind::Unknown);
        assert!(resolved.video_id.is_none());
    }
}

use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;

use super::patterns::{VIDEO_ID_FALLBACK_RE, VIDEO_ID_RE, VIDEO_PATH_RE};

const SHORT_LINK_HOST: &str = "youtu.be";
const MAIN_HOSTS: &[&str] = &["youtube.com", "m.youtube.com"];

/// Canonical 11 character YouTube video identifier.
///
/// Only the grammar is checked; whether the video exists is discovered by
/// the network stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Accepts `raw` only if it already matches the identifier grammar.
    pub fn parse(raw: &str) -> Option<Self> {
        if VIDEO_ID_RE.is_match(raw) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for VideoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Resolve free-form input (bare id, watch/short/embed/shorts/live URL) into
/// a video identifier. Pure string processing, never fails loudly.
pub fn resolve_video_id(input: &str) -> Option<VideoId> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(id) = VideoId::parse(input) {
        return Some(id);
    }

    if let Ok(url) = Url::parse(input) {
        if let Some(id) = from_url(&url) {
            return Some(id);
        }
    }

    VIDEO_ID_FALLBACK_RE
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
}

fn from_url(url: &Url) -> Option<VideoId> {
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    if host == SHORT_LINK_HOST {
        let first = url.path_segments()?.next()?;
        return VideoId::parse(first);
    }

    if MAIN_HOSTS.contains(&host) {
        if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
            return VideoId::parse(&v);
        }
        return VIDEO_PATH_RE
            .captures(url.path())
            .and_then(|caps| caps.get(1))
            .map(|m| VideoId(m.as_str().to_string()));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    fn resolved(input: &str) -> Option<String> {
        resolve_video_id(input).map(|id| id.as_str().to_string())
    }

    #[test]
    fn test_bare_identifiers_pass_through() {
        for id in [ID, "___________", "-----------", "A1b2C3d4E5f", "abc_DEF-123"] {
            assert_eq!(resolved(id).as_deref(), Some(id));
        }
        assert_eq!(resolved(&format!("  {}\n", ID)).as_deref(), Some(ID));
    }

    #[test]
    fn test_known_url_shapes() {
        let urls = [
            format!("https://www.youtube.com/watch?v={}", ID),
            format!("https://youtube.com/watch?v={}&t=42s", ID),
            format!("https://m.youtube.com/watch?feature=share&v={}", ID),
            format!("https://youtu.be/{}", ID),
            format!("https://youtu.be/{}?si=abcdef", ID),
            format!("https://www.youtube.com/embed/{}", ID),
            format!("https://www.youtube.com/v/{}", ID),
            format!("https://www.youtube.com/shorts/{}", ID),
            format!("https://www.youtube.com/live/{}?feature=shared", ID),
        ];
        for url in &urls {
            assert_eq!(resolved(url).as_deref(), Some(ID), "{}", url);
        }
    }

    #[test]
    fn test_fallback_scan() {
        assert_eq!(resolved(&format!("youtube.com/watch?v={}", ID)).as_deref(), Some(ID));
        assert_eq!(resolved(&format!("see youtu.be/{} for details", ID)).as_deref(), Some(ID));
    }

    #[test]
    fn test_unresolvable_input() {
        assert_eq!(resolved("not a url at all"), None);
        assert_eq!(resolved(""), None);
        assert_eq!(resolved("   "), None);
        assert_eq!(resolved("tooshort"), None);
        assert_eq!(resolved("https://www.youtube.com/feed/trending"), None);
    }

    #[test]
    fn test_invalid_v_parameter_falls_back() {
        assert_eq!(resolved("https://www.youtube.com/watch?v=short"), None);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = VideoId::parse(ID).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{}\"", ID));
    }
}

//! Every pattern matched against YouTube markup lives here, so markup drift
//! only ever needs fixing in this file.

use lazy_static::lazy_static;
use regex::Regex;

/// Grammar of a video identifier
pub const VIDEO_ID_PATTERN: &str = r"^[A-Za-z0-9_-]{11}$";

/// Marker present when the watch page is replaced by a captcha challenge
pub const BOT_CHALLENGE_MARKER: &str = r#"class="g-recaptcha""#;

/// Query parameter that forces the srv3 timed-text dialect
pub const FORMAT_OVERRIDE_PARAM: &str = "fmt";

/// `kind` value of machine-transcribed caption tracks
pub const ASR_TRACK_KIND: &str = "asr";

lazy_static! {
    pub static ref VIDEO_ID_RE: Regex = Regex::new(VIDEO_ID_PATTERN).unwrap();

    /// `/embed/<id>`, `/v/<id>`, `/shorts/<id>`, `/live/<id>`
    pub static ref VIDEO_PATH_RE: Regex =
        Regex::new(r"^/(?:embed|v|shorts|live)/([A-Za-z0-9_-]{11})").unwrap();

    /// Last resort scan over the raw input
    pub static ref VIDEO_ID_FALLBACK_RE: Regex =
        Regex::new(r"(?:v=|/|youtu\.be/)([A-Za-z0-9_-]{11})").unwrap();

    pub static ref API_KEY_RE: Regex =
        Regex::new(r#""INNERTUBE_API_KEY"\s*:\s*"([A-Za-z0-9_-]+)""#).unwrap();

    /// One `<text start=".." dur="..">..</text>` element of the timed-text XML
    pub static ref TIMED_TEXT_RE: Regex =
        Regex::new(r#"(?s)<text\s+start="([^"]*)"\s+dur="([^"]*)"[^>]*>(.*?)</text>"#).unwrap();

    /// Any markup tag nested in caption text
    pub static ref MARKUP_TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();

    /// Root element of the srv3 dialect, which uses `<p t=".." d="..">` cues
    pub static ref SRV3_DOCUMENT_RE: Regex =
        Regex::new(r#"<timedtext[^>]*\bformat="3""#).unwrap();
}

/// Pulls the embedded player API key out of a watch page.
pub fn extract_api_key(html: &str) -> Option<&str> {
    API_KEY_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn is_bot_challenge(html: &str) -> bool {
    html.contains(BOT_CHALLENGE_MARKER)
}

pub fn is_srv3_document(body: &str) -> bool {
    SRV3_DOCUMENT_RE.is_match(body)
}

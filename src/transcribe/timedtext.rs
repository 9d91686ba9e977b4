use crate::error::{Result, TranscriptError};
use crate::extractors::patterns::{MARKUP_TAG_RE, TIMED_TEXT_RE};

use super::TranscriptSegment;

/// Entity and newline replacements, applied in this order
const REPLACEMENTS: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&#x27;", "'"),
    ("&#x2F;", "/"),
    ("&apos;", "'"),
    ("\\n", " "),
    ("\n", " "),
];

/// Parse a timed-text XML document into segments, in document order.
///
/// Elements whose text is empty after cleanup are dropped. A document with
/// no remaining segments is a `NoTranscript` failure.
pub fn parse_timed_text(xml: &str) -> Result<Vec<TranscriptSegment>> {
    let mut segments = Vec::new();

    for caps in TIMED_TEXT_RE.captures_iter(xml) {
        let (start, dur) = match (seconds_to_ms(&caps[1]), seconds_to_ms(&caps[2])) {
            (Some(start), Some(dur)) => (start, dur),
            _ => {
                tracing::warn!(
                    "Skipping caption with malformed timing: start={:?} dur={:?}",
                    &caps[1],
                    &caps[2]
                );
                continue;
            }
        };

        let text = clean_text(&caps[3]);
        if text.is_empty() {
            continue;
        }

        segments.push(TranscriptSegment {
            text,
            start_ms: start,
            duration_ms: dur,
        });
    }

    if segments.is_empty() {
        return Err(TranscriptError::NoTranscript(
            "Transcript was found but contained no text segments.".to_string(),
        ));
    }

    tracing::debug!("Parsed {} transcript segment(s)", segments.len());
    Ok(segments)
}

/// Strip nested markup, decode entities, trim.
pub fn clean_text(raw: &str) -> String {
    let stripped = MARKUP_TAG_RE.replace_all(raw, "");
    let decoded = REPLACEMENTS
        .iter()
        .fold(stripped.into_owned(), |text, (from, to)| text.replace(from, to));
    decoded.trim().to_string()
}

/// Fractional seconds to whole milliseconds, rounded to nearest.
fn seconds_to_ms(raw: &str) -> Option<u64> {
    let seconds: f64 = raw.trim().parse().ok()?;
    if !seconds.is_finite() {
        return None;
    }
    Some((seconds.max(0.0) * 1000.0).round() as u64)
}

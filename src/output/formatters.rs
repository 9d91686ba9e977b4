use anyhow::{Context, Result};

use crate::transcribe::{TranscriptResult, TranscriptSegment};
use crate::utils::format_timestamp;

/// One line per segment, optionally prefixed with `[m:ss]`
pub fn format_as_text(result: &TranscriptResult, include_timestamps: bool) -> String {
    result
        .segments
        .iter()
        .map(|segment| {
            if include_timestamps {
                format!("[{}] {}", format_timestamp(segment.start_ms), segment.text)
            } else {
                segment.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_as_json(result: &TranscriptResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize transcript")
}

pub fn format_as_srt(result: &TranscriptResult) -> String {
    segments_to_srt(&result.segments)
}

/// SRT cues; the end time is start plus duration, with no minimum length
pub fn segments_to_srt(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            format!(
                "{}\n{} --> {}\n{}\n",
                i + 1,
                format_srt_time(segment.start_ms),
                format_srt_time(segment.end_ms()),
                segment.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_as_vtt(result: &TranscriptResult) -> String {
    let mut out = String::from("WEBVTT\n\n");
    for segment in &result.segments {
        out.push_str(&format!(
            "{} --> {}\n{}\n\n",
            format_vtt_time(segment.start_ms),
            format_vtt_time(segment.end_ms()),
            segment.text
        ));
    }
    out
}

pub fn format_as_csv(result: &TranscriptResult) -> Result<String> {
    let mut out = String::from("start_ms,duration_ms,timestamp,text\n");
    for segment in &result.segments {
        out.push_str(&format!(
            "{},{},{},{}\n",
            segment.start_ms,
            segment.duration_ms,
            format_timestamp(segment.start_ms),
            csv_field(&segment.text)
        ));
    }
    Ok(out)
}

/// `HH:MM:SS,mmm`
pub fn format_srt_time(ms: u64) -> String {
    let (h, m, s, millis) = split_ms(ms);
    format!("{:02}:{:02}:{:02},{:03}", h, m, s, millis)
}

/// `HH:MM:SS.mmm`
pub fn format_vtt_time(ms: u64) -> String {
    let (h, m, s, millis) = split_ms(ms);
    format!("{:02}:{:02}:{:02}.{:03}", h, m, s, millis)
}

fn split_ms(ms: u64) -> (u64, u64, u64, u64) {
    let total_secs = ms / 1000;
    (total_secs / 3600, (total_secs % 3600) / 60, total_secs % 60, ms % 1000)
}

fn csv_field(text: &str) -> String {
    if text.contains([',', '"', '\n']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Parse an SRT document back into segments
pub fn parse_srt(srt: &str) -> Result<Vec<TranscriptSegment>> {
    let normalized = srt.replace("\r\n", "\n");
    let mut segments = Vec::new();

    for block in normalized.split("\n\n") {
        let mut lines = block.lines().filter(|line| !line.trim().is_empty());

        let Some(first) = lines.next() else {
            continue;
        };
        // The cue number is optional
        let timing = if first.contains("-->") {
            first
        } else {
            lines.next().with_context(|| format!("Missing timing line after cue {}", first))?
        };

        let (start, end) = timing
            .split_once("-->")
            .with_context(|| format!("Malformed timing line: {}", timing))?;
        let start_ms = parse_srt_time(start.trim())?;
        let end_ms = parse_srt_time(end.trim())?;

        let text = lines.collect::<Vec<_>>().join(" ");
        segments.push(TranscriptSegment {
            text,
            start_ms,
            duration_ms: end_ms.saturating_sub(start_ms),
        });
    }

    Ok(segments)
}

fn parse_srt_time(raw: &str) -> Result<u64> {
    let (clock, millis) = raw
        .split_once([',', '.'])
        .with_context(|| format!("Malformed timestamp: {}", raw))?;

    let parts = clock
        .split(':')
        .map(|part| part.parse::<u64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Malformed timestamp: {}", raw))?;

    let [h, m, s] = parts[..] else {
        anyhow::bail!("Malformed timestamp: {}", raw);
    };
    let millis: u64 = millis
        .parse()
        .with_context(|| format!("Malformed timestamp: {}", raw))?;

    h.checked_mul(60)
        .and_then(|v| v.checked_add(m))
        .and_then(|v| v.checked_mul(60))
        .and_then(|v| v.checked_add(s))
        .and_then(|v| v.checked_mul(1000))
        .and_then(|v| v.checked_add(millis))
        .with_context(|| format!("Timestamp out of range: {}", raw))
}

use std::path::PathBuf;

use crate::cli::OutputFormat;

/// Format milliseconds as `m:ss`, or `h:mm:ss` past the hour
pub fn format_timestamp(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Sanitize a name for use as a file stem
pub fn safe_filename(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();

    let joined = kept.split_whitespace().collect::<Vec<_>>().join("_");
    let truncated: String = joined.chars().take(80).collect();

    if truncated.is_empty() {
        "transcript".to_string()
    } else {
        truncated
    }
}

/// Default output path for a saved transcript, e.g. `dQw4w9WgXcQ_en.srt`
pub fn default_output_path(video_id: &str, language: &str, format: &OutputFormat) -> PathBuf {
    PathBuf::from(format!(
        "{}.{}",
        safe_filename(&format!("{}_{}", video_id, language)),
        format.extension()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "0:00");
        assert_eq!(format_timestamp(5_999), "0:05");
        assert_eq!(format_timestamp(90_000), "1:30");
        assert_eq!(format_timestamp(3_661_000), "1:01:01");
    }

    #[test]
    fn test_safe_filename() {
        assert_eq!(safe_filename("Hello, World!"), "Hello_World");
        assert_eq!(safe_filename("  spaced   out  "), "spaced_out");
        assert_eq!(safe_filename("???"), "transcript");
        assert_eq!(safe_filename(&"a".repeat(100)).len(), 80);
    }

    #[test]
    fn test_default_output_path() {
        let path = default_output_path("dQw4w9WgXcQ", "pt-BR", &OutputFormat::Srt);
        assert_eq!(path, PathBuf::from("dQw4w9WgXcQ_pt-BR.srt"));
    }
}

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::OutputFormat;
use crate::transcribe::TranscriptResult;

pub mod formatters;

pub use formatters::*;

/// Render a transcript in the requested format
pub fn render(result: &TranscriptResult, format: &OutputFormat, include_timestamps: bool) -> Result<String> {
    let content = match format {
        OutputFormat::Text => format_as_text(result, include_timestamps),
        OutputFormat::Json => format_as_json(result)?,
        OutputFormat::Srt => format_as_srt(result),
        OutputFormat::Vtt => format_as_vtt(result),
        OutputFormat::Csv => format_as_csv(result)?,
    };
    Ok(content)
}

/// Save transcript to file
pub async fn save_to_file(
    result: &TranscriptResult,
    path: &Path,
    format: &OutputFormat,
    include_timestamps: bool,
) -> Result<()> {
    let content = render(result, format, include_timestamps)?;
    fs_err::write(path, content)
        .with_context(|| format!("Failed to write transcript to {}", path.display()))?;
    Ok(())
}

/// Print transcript to console
pub fn print_to_console(
    result: &TranscriptResult,
    format: &OutputFormat,
    include_timestamps: bool,
) -> Result<()> {
    let content = render(result, format, include_timestamps)?;
    println!("{}", content);
    Ok(())
}

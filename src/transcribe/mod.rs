use serde::{Deserialize, Serialize};

use crate::config::YoutubeConfig;
use crate::error::{Result, TranscriptError};
use crate::extractors::youtube::YoutubeExtractor;
use crate::extractors::{resolve_video_id, CaptionSource, CaptionTrack, VideoId};

pub mod selector;
pub mod timedtext;

pub use selector::select_track;
pub use timedtext::parse_timed_text;

/// Transcript of one video in one caption language
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResult {
    pub video_id: VideoId,

    /// Language code of the chosen track
    pub language: String,

    /// Display name of the chosen track
    pub language_name: String,

    pub is_auto_generated: bool,

    /// Full catalog, so callers can offer other languages
    pub available_languages: Vec<CaptionTrack>,

    /// Never empty
    pub segments: Vec<TranscriptSegment>,

    /// When the transcript was fetched
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

/// Individual transcript segment with timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSegment {
    /// Segment text, never empty
    pub text: String,

    /// Offset from the start of the video
    pub start_ms: u64,

    pub duration_ms: u64,
}

impl TranscriptSegment {
    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }
}

/// Main transcript pipeline: resolve, scrape key, list captions, select, parse.
///
/// Stages run strictly in sequence and any failure ends the request.
pub struct TranscriptPipeline {
    source: Box<dyn CaptionSource>,
}

impl TranscriptPipeline {
    /// Create a pipeline talking to YouTube
    pub fn new(config: YoutubeConfig) -> Self {
        Self::with_source(Box::new(YoutubeExtractor::with_config(config)))
    }

    pub fn with_source(source: Box<dyn CaptionSource>) -> Self {
        Self { source }
    }

    /// Resolve user input into a transcript
    pub async fn resolve_transcript(
        &self,
        raw_input: &str,
        requested_lang: Option<&str>,
    ) -> Result<TranscriptResult> {
        let video_id = resolve_identifier(raw_input).ok_or_else(invalid_input)?;
        let requested_lang = requested_lang.filter(|lang| !lang.is_empty());

        tracing::info!(
            "Fetching {} transcript for {} ({})",
            self.source.platform_name(),
            video_id,
            requested_lang.unwrap_or("default language")
        );

        let tracks = self.fetch_tracks(&video_id).await?;
        let chosen = select_track(&tracks, requested_lang)?;

        tracing::info!(
            "Selected track {} ({}{})",
            chosen.language_code,
            chosen.display_name,
            if chosen.is_auto_generated { ", auto-generated" } else { "" }
        );

        let document = self.source.fetch_timed_text(chosen).await?;
        let segments = parse_timed_text(&document)?;

        Ok(TranscriptResult {
            video_id,
            language: chosen.language_code.clone(),
            language_name: chosen.display_name.clone(),
            is_auto_generated: chosen.is_auto_generated,
            segments,
            available_languages: tracks.clone(),
            fetched_at: chrono::Utc::now(),
        })
    }

    /// List the caption catalog without fetching any transcript
    pub async fn list_tracks(&self, raw_input: &str) -> Result<Vec<CaptionTrack>> {
        let video_id = resolve_identifier(raw_input).ok_or_else(invalid_input)?;
        self.fetch_tracks(&video_id).await
    }

    async fn fetch_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>> {
        let api_key = self.source.fetch_api_key(video_id).await?;
        self.source.fetch_catalog(video_id, &api_key).await
    }
}

/// Resolve input into a video identifier without touching the network
pub fn resolve_identifier(raw_input: &str) -> Option<VideoId> {
    resolve_video_id(raw_input)
}

fn invalid_input() -> TranscriptError {
    TranscriptError::InvalidUrl("Please provide a valid YouTube URL.".to_string())
}

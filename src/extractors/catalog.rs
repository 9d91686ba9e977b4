use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use super::patterns::ASR_TRACK_KIND;
use crate::error::{Result, TranscriptError};

/// One caption track offered for a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub language_code: String,

    /// Human readable label; the language code when YouTube gives none
    pub display_name: String,

    /// True for automatic speech recognition tracks
    pub is_auto_generated: bool,

    /// Where the raw timed-text document is fetched from
    #[serde(skip)]
    pub source_url: String,
}

/// Subset of the player API response the pipeline reads
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub playability_status: Option<PlayabilityStatus>,
    pub captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
pub struct PlayabilityStatus {
    pub status: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    pub tracklist: Option<CaptionTracklist>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTracklist {
    #[serde(default)]
    pub caption_tracks: Vec<RawCaptionTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCaptionTrack {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub name: Option<TrackName>,
    #[serde(default)]
    pub kind: Option<String>,
}

/// The `name` of a track comes either as plain text or as rich-text runs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TrackName {
    Text(PlainName),
    Runs { runs: Vec<TextRun> },
    Unknown(IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PlainName {
    Bare(String),
    #[serde(rename_all = "camelCase")]
    Simple { simple_text: String },
}

#[derive(Debug, Deserialize)]
pub struct TextRun {
    #[serde(default)]
    pub text: Option<String>,
}

impl TrackName {
    fn text(&self) -> Option<&str> {
        match self {
            TrackName::Text(PlainName::Bare(text)) => Some(text),
            TrackName::Text(PlainName::Simple { simple_text }) => Some(simple_text),
            TrackName::Runs { runs } => runs.first().and_then(|run| run.text.as_deref()),
            TrackName::Unknown(_) => None,
        }
    }
}

impl RawCaptionTrack {
    /// Tracks without a language code or fetch URL cannot be used and yield `None`.
    fn into_track(self) -> Option<CaptionTrack> {
        let (Some(language_code), Some(source_url)) = (self.language_code, self.base_url) else {
            tracing::warn!("Skipping caption track without languageCode or baseUrl");
            return None;
        };

        let display_name = self
            .name
            .as_ref()
            .and_then(TrackName::text)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| language_code.clone());

        Some(CaptionTrack {
            is_auto_generated: self.kind.as_deref() == Some(ASR_TRACK_KIND),
            display_name,
            language_code,
            source_url,
        })
    }
}

impl PlayerResponse {
    /// Check playability, then hand back the caption catalog in YouTube's order.
    pub fn into_caption_tracks(self) -> Result<Vec<CaptionTrack>> {
        if let Some(playability) = self.playability_status {
            match playability.status.as_deref() {
                Some("OK") => {}
                Some("ERROR") | Some("LOGIN_REQUIRED") => {
                    return Err(TranscriptError::VideoUnavailable(
                        playability.reason.unwrap_or_else(|| "Video unavailable".to_string()),
                    ));
                }
                _ => {
                    return Err(TranscriptError::VideoUnavailable(
                        playability.reason.unwrap_or_else(|| "Video is unplayable.".to_string()),
                    ));
                }
            }
        }

        let tracks: Vec<CaptionTrack> = self
            .captions
            .and_then(|captions| captions.tracklist)
            .map(|tracklist| tracklist.caption_tracks)
            .unwrap_or_default()
            .into_iter()
            .filter_map(RawCaptionTrack::into_track)
            .collect();

        if tracks.is_empty() {
            return Err(TranscriptError::NoTranscript(
                "No captions are available for this video.".to_string(),
            ));
        }

        Ok(tracks)
    }
}

/// Decode a player API body and extract its caption catalog.
pub fn parse_player_response(body: &str) -> Result<Vec<CaptionTrack>> {
    let response: PlayerResponse = serde_json::from_str(body).map_err(|e| {
        TranscriptError::ServerError(format!("Unexpected response from YouTube API: {}", e))
    })?;
    response.into_caption_tracks()
}

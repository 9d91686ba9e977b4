use crate::error::{Result, TranscriptError};
use crate::extractors::CaptionTrack;

/// Pick one track from the catalog.
///
/// A requested language must match a track's code exactly. Without one the
/// first human-authored track wins, then the first track of any kind.
pub fn select_track<'a>(tracks: &'a [CaptionTrack], requested: Option<&str>) -> Result<&'a CaptionTrack> {
    if let Some(lang) = requested {
        return tracks
            .iter()
            .find(|track| track.language_code == lang)
            .ok_or_else(|| {
                let available = tracks
                    .iter()
                    .map(|track| track.language_code.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                TranscriptError::NoTranscript(format!(
                    "No transcript in '{}'. Available: {}",
                    lang, available
                ))
            });
    }

    tracks
        .iter()
        .find(|track| !track.is_auto_generated)
        .or_else(|| tracks.first())
        .ok_or_else(|| {
            TranscriptError::NoTranscript("No captions are available for this video.".to_string())
        })
}

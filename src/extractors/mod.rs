use async_trait::async_trait;

pub mod catalog;
pub mod patterns;
pub mod video_id;
pub mod youtube;

pub use catalog::CaptionTrack;
pub use video_id::{resolve_video_id, VideoId};

use crate::error::Result;

/// Network side of the transcript pipeline.
///
/// Each call is a single round trip with its own timeout; implementations
/// never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Scrape the short-lived player API key from the watch page
    async fn fetch_api_key(&self, video_id: &VideoId) -> Result<String>;

    /// Ask the player API for the caption catalog of a video
    async fn fetch_catalog(&self, video_id: &VideoId, api_key: &str) -> Result<Vec<CaptionTrack>>;

    /// Download the raw timed-text document of a track
    async fn fetch_timed_text(&self, track: &CaptionTrack) -> Result<String>;

    /// Get the name of the platform behind this source
    fn platform_name(&self) -> &'static str;
}

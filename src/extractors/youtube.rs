use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, USER_AGENT};
use reqwest::Client;
use serde_json::json;
use url::Url;

use super::catalog::parse_player_response;
use super::patterns::{self, FORMAT_OVERRIDE_PARAM};
use super::{CaptionSource, CaptionTrack, VideoId};
use crate::config::YoutubeConfig;
use crate::error::{Result, TranscriptError};

/// Caption source that scrapes YouTube's watch page and player API
pub struct YoutubeExtractor {
    client: Client,
    config: YoutubeConfig,
}

impl YoutubeExtractor {
    pub fn new() -> Self {
        Self::with_config(YoutubeConfig::default())
    }

    pub fn with_config(config: YoutubeConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn watch_url(&self, video_id: &VideoId) -> Result<Url> {
        let mut url = Url::parse(&self.config.watch_url)
            .map_err(|e| TranscriptError::ServerError(format!("Invalid watch URL: {}", e)))?;
        url.query_pairs_mut().append_pair("v", video_id.as_str());
        Ok(url)
    }

    fn player_url(&self, api_key: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.player_api_url)
            .map_err(|e| TranscriptError::ServerError(format!("Invalid player API URL: {}", e)))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }
}

#[async_trait]
impl CaptionSource for YoutubeExtractor {
    async fn fetch_api_key(&self, video_id: &VideoId) -> Result<String> {
        let url = self.watch_url(video_id)?;
        tracing::debug!("Fetching watch page: {}", url);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT_LANGUAGE, &self.config.accept_language)
            .header(COOKIE, &self.config.consent_cookie)
            .timeout(self.config.page_timeout())
            .send()
            .await?;

        let html = response.text().await?;

        if patterns::is_bot_challenge(&html) {
            tracing::warn!("Watch page for {} returned a captcha challenge", video_id);
            return Err(TranscriptError::RateLimited(
                "YouTube rate limit reached. Please try again later.".to_string(),
            ));
        }

        let key = patterns::extract_api_key(&html).ok_or_else(|| {
            TranscriptError::VideoUnavailable(
                "Could not extract API key. The video may be unavailable.".to_string(),
            )
        })?;

        tracing::debug!("Extracted player API key for {}", video_id);
        Ok(key.to_string())
    }

    async fn fetch_catalog(&self, video_id: &VideoId, api_key: &str) -> Result<Vec<CaptionTrack>> {
        let url = self.player_url(api_key)?;
        let body = json!({
            "context": {
                "client": {
                    "clientName": self.config.client_name,
                    "clientVersion": self.config.client_version,
                }
            },
            "videoId": video_id.as_str(),
        });

        tracing::debug!(
            "Querying player API for {} as {} {}",
            video_id,
            self.config.client_name,
            self.config.client_version
        );

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, &self.config.user_agent)
            .body(body.to_string())
            .timeout(self.config.player_timeout())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptError::ServerError(format!(
                "YouTube API returned status {}.",
                status.as_u16()
            )));
        }

        let text = response.text().await?;
        let tracks = parse_player_response(&text)?;

        tracing::info!("Found {} caption track(s) for {}", tracks.len(), video_id);
        Ok(tracks)
    }

    async fn fetch_timed_text(&self, track: &CaptionTrack) -> Result<String> {
        let url = strip_format_override(&track.source_url)?;
        tracing::debug!("Fetching {} timed text: {}", track.language_code, url);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.config.user_agent)
            .timeout(self.config.timedtext_timeout())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptError::ServerError(format!(
                "Timed text request returned status {}.",
                status.as_u16()
            )));
        }

        let body = response.text().await?;

        if patterns::is_srv3_document(&body) {
            return Err(TranscriptError::ServerError(
                "YouTube served an unsupported timed-text format.".to_string(),
            ));
        }

        Ok(body)
    }

    fn platform_name(&self) -> &'static str {
        "YouTube"
    }
}

impl Default for YoutubeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove any `fmt` override so the plain timed-text XML dialect is served.
pub fn strip_format_override(source_url: &str) -> Result<Url> {
    let mut url = Url::parse(source_url).map_err(|_| {
        TranscriptError::ServerError(format!("Caption track has an invalid URL: {}", source_url))
    })?;

    // Work on the raw query so signed parameters keep their exact bytes
    let kept = url
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| {
            let key = pair.split_once('=').map_or(*pair, |(key, _)| key);
            !pair.is_empty() && key != FORMAT_OVERRIDE_PARAM
        })
        .collect::<Vec<_>>()
        .join("&");

    url.set_query((!kept.is_empty()).then_some(kept.as_str()));

    Ok(url)
}

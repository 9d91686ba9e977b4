use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::cli::OutputFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// YouTube endpoints and client identity
    #[serde(default)]
    pub youtube: YoutubeConfig,

    /// Application settings
    #[serde(default)]
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeConfig {
    /// Public watch page, queried with `?v=<id>`
    pub watch_url: String,

    /// Internal player endpoint, queried with `?key=<api key>`
    pub player_api_url: String,

    /// Desktop browser user agent sent with every request
    pub user_agent: String,

    pub accept_language: String,

    /// Pre-set consent cookie; without it the watch page is a consent wall
    pub consent_cookie: String,

    /// Client identity reported to the player API
    pub client_name: String,
    pub client_version: String,

    pub page_timeout_secs: u64,
    pub player_timeout_secs: u64,
    pub timedtext_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Caption language used when none is requested
    pub default_language: Option<String>,

    /// Default output format
    pub default_output_format: OutputFormat,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            watch_url: "https://www.youtube.com/watch".to_string(),
            player_api_url: "https://www.youtube.com/youtubei/v1/player".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            consent_cookie: "SOCS=CAESEwgDEgk2MTkxMjkyNjEaAmVuIAEaBgiA_LyaBg; CONSENT=PENDING+987".to_string(),
            client_name: "ANDROID".to_string(),
            client_version: "20.10.38".to_string(),
            page_timeout_secs: 15,
            player_timeout_secs: 15,
            timedtext_timeout_secs: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            youtube: YoutubeConfig::default(),
            app: AppConfig::default(),
        }
    }
}

impl YoutubeConfig {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn player_timeout(&self) -> Duration {
        Duration::from_secs(self.player_timeout_secs)
    }

    pub fn timedtext_timeout(&self) -> Duration {
        Duration::from_secs(self.timedtext_timeout_secs)
    }

    /// Point both endpoints at another host, keeping their paths
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.watch_url = format!("{}/watch", base);
        self.player_api_url = format!("{}/youtubei/v1/player", base);
        self
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs_err::read_to_string(&config_path)
                .context("Failed to read config file")?;

            let config: Config = serde_yaml::from_str(&content)
                .context("Failed to parse config file")?;

            config.validate()?;
            tracing::debug!("Loaded configuration from {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(&config_path, content)
            .context("Failed to write config file")?;

        Ok(config_path)
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("ytscribe").join("config.yaml"))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let yt = &self.youtube;

        Url::parse(&yt.watch_url)
            .with_context(|| format!("Invalid watch_url: {}", yt.watch_url))?;
        Url::parse(&yt.player_api_url)
            .with_context(|| format!("Invalid player_api_url: {}", yt.player_api_url))?;

        if yt.page_timeout_secs == 0 || yt.player_timeout_secs == 0 || yt.timedtext_timeout_secs == 0 {
            anyhow::bail!("Request timeouts must be greater than zero");
        }

        if yt.client_name.is_empty() || yt.client_version.is_empty() {
            anyhow::bail!("Player API client name and version must be configured");
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Watch URL: {}", self.youtube.watch_url);
        println!("  Player API: {}", self.youtube.player_api_url);
        println!("  Client: {} {}", self.youtube.client_name, self.youtube.client_version);
        println!(
            "  Timeouts: page {}s, player {}s, timed text {}s",
            self.youtube.page_timeout_secs,
            self.youtube.player_timeout_secs,
            self.youtube.timedtext_timeout_secs
        );
        if let Some(lang) = &self.app.default_language {
            println!("  Default Language: {}", lang);
        }
        println!("  Default Format: {}", self.app.default_output_format);
    }
}

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ytscribe",
    about = "YT Scribe - Fetch timestamped transcripts from YouTube caption tracks",
    version,
    long_about = "A CLI tool that resolves a YouTube URL or video ID into a clean, timestamped transcript using the captions YouTube already has. Exports plain text, JSON, SRT, WebVTT and CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the transcript of a video
    Transcript {
        /// YouTube URL or 11 character video ID
        #[arg(value_name = "URL_OR_ID")]
        input: String,

        /// Caption language code, exact match (e.g. en, de, pt-BR)
        #[arg(short, long, value_name = "LANG", env = "YTSCRIBE_LANG")]
        lang: Option<String>,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Include timestamps in text output (srt/vtt/csv/json always include them)
        #[arg(long)]
        timestamps: bool,
    },

    /// List the caption languages available for a video
    Languages {
        /// YouTube URL or 11 character video ID
        #[arg(value_name = "URL_OR_ID")]
        input: String,
    },

    /// Print the video ID a URL resolves to, without any network access
    Resolve {
        /// YouTube URL or 11 character video ID
        #[arg(value_name = "URL_OR_ID")]
        input: String,
    },

    /// Show or initialise the configuration file
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,

        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text
    #[default]
    Text,
    /// JSON with timestamps
    Json,
    /// SRT subtitle format
    Srt,
    /// WebVTT format
    Vtt,
    /// CSV format
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Srt => "srt",
            OutputFormat::Vtt => "vtt",
            OutputFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Srt => write!(f, "srt"),
            OutputFormat::Vtt => write!(f, "vtt"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

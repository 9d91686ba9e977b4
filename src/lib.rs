//! YT Scribe - resolve a YouTube URL or video ID into a timestamped transcript
//!
//! The pipeline scrapes a short-lived API key from the watch page, asks the
//! player API for the caption catalog, picks a track and parses its timed-text
//! document into clean segments. Every failure is classified into a small,
//! stable set of error kinds.

pub mod cli;
pub mod config;
pub mod error;
pub mod extractors;
pub mod output;
pub mod transcribe;
pub mod utils;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use error::{ErrorBody, ErrorKind, Result, Severity, TranscriptError};
pub use extractors::{CaptionSource, CaptionTrack, VideoId};
pub use transcribe::{resolve_identifier, TranscriptPipeline, TranscriptResult, TranscriptSegment};

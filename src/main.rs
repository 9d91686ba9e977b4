use anyhow::Result;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ytscribe::cli::{Cli, Commands};
use ytscribe::config::Config;
use ytscribe::output;
use ytscribe::transcribe::{resolve_identifier, TranscriptPipeline};
use ytscribe::utils::default_output_path;
use ytscribe::TranscriptError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(err) = run(cli).await {
        let code = match err.downcast_ref::<TranscriptError>() {
            Some(transcript_err) => {
                let kind = transcript_err.kind();
                tracing::debug!("Transcript error: {:?}", transcript_err);
                eprintln!(
                    "{} {}",
                    style(format!("error[{}]:", kind.code())).red().bold(),
                    transcript_err.message()
                );
                kind.severity().exit_code()
            }
            None => {
                eprintln!("{} {:#}", style("error:").red().bold(), err);
                1
            }
        };
        std::process::exit(code);
    }
}

fn init_tracing(cli: &Cli) {
    let default_filter = if cli.verbose { "ytscribe=debug" } else { "ytscribe=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr so stdout only carries the transcript
    tracing_subscriber::registry()
        .with(filter)
        .with(cli.log_json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!cli.log_json).then(|| {
            tracing_subscriber::fmt::layer().with_writer(std::io::stderr)
        }))
        .init();
}

fn spinner(quiet: bool, message: &'static str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.set_message(message);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Transcript {
            input,
            lang,
            output,
            format,
            timestamps,
        } => {
            let config = Config::load().await?;
            let lang = lang.or_else(|| config.app.default_language.clone());
            let format = format.unwrap_or_else(|| config.app.default_output_format.clone());
            let pipeline = TranscriptPipeline::new(config.youtube.clone());

            let progress = spinner(cli.quiet, "Fetching transcript...");
            let result = pipeline.resolve_transcript(&input, lang.as_deref()).await;
            progress.finish_and_clear();
            let result = result?;

            tracing::info!(
                "Fetched {} segment(s) in {} ({} language(s) available)",
                result.segments.len(),
                result.language,
                result.available_languages.len()
            );

            match output {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(default_output_path(result.video_id.as_str(), &result.language, &format))
                    } else {
                        path
                    };
                    output::save_to_file(&result, &path, &format, timestamps).await?;
                    println!("Transcript saved to: {}", path.display());
                }
                None => {
                    output::print_to_console(&result, &format, timestamps)?;
                }
            }
        }
        Commands::Languages { input } => {
            let config = Config::load().await?;
            let pipeline = TranscriptPipeline::new(config.youtube.clone());

            let progress = spinner(cli.quiet, "Fetching caption tracks...");
            let tracks = pipeline.list_tracks(&input).await;
            progress.finish_and_clear();

            for track in tracks? {
                println!(
                    "{:<10} {}{}",
                    track.language_code,
                    track.display_name,
                    if track.is_auto_generated { " (auto-generated)" } else { "" }
                );
            }
        }
        Commands::Resolve { input } => {
            let video_id = resolve_identifier(&input).ok_or_else(|| {
                TranscriptError::InvalidUrl("Please provide a valid YouTube URL.".to_string())
            })?;
            println!("{}", video_id);
        }
        Commands::Config { show, init } => {
            if init {
                let path = Config::default().save().await?;
                println!("Configuration written to: {}", path.display());
            } else if show {
                Config::load().await?.display();
            } else {
                Config::load().await?.display();
                println!("Edit {} to change these settings.", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

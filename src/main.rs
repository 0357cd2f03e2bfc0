//! Ask-Video CLI entry point.

use anyhow::Result;
use ask_video::captions::{self, YtDlpProvider};
use ask_video::chat::{ChatSession, OpenAiChat, SessionStore};
use ask_video::cli::{Cli, Output};
use ask_video::config::Settings;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ask_video={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Fail fast if the API key is missing; nothing useful can follow.
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            Output::error(&format!("{}", e));
            std::process::exit(1);
        }
    };

    let model = cli.model.clone().unwrap_or_else(|| settings.model.clone());

    Output::info(&format!("Processing video: {}", cli.url));

    let provider = YtDlpProvider::new();
    let spinner = Output::spinner("Downloading subtitles...");
    let transcript = captions::download_subtitles(&provider, &cli.url).await;
    spinner.finish_and_clear();

    let transcript = match transcript {
        Ok(Some(transcript)) => transcript,
        Ok(None) => {
            Output::error("Could not find or download subtitles for this video.");
            return Ok(());
        }
        Err(e) => {
            Output::error(&format!("{}", e));
            std::process::exit(1);
        }
    };

    Output::success("Downloaded successfully!");

    let chat_model = OpenAiChat::new(&settings, &model);
    let mut session = ChatSession::new(Arc::new(chat_model), SessionStore::new(), &transcript);

    session.run().await?;

    Ok(())
}

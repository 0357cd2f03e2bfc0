//! CLI module for ask-video.

mod output;

pub use output::Output;

use clap::Parser;

/// Ask questions about a YouTube or Bilibili video.
///
/// Downloads the video's subtitles and starts an interactive chat session
/// grounded in them.
#[derive(Parser, Debug)]
#[command(name = "ask-video")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Link to the video
    pub url: String,

    /// Chat model to use (overrides OPENAI_MODEL_ID)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

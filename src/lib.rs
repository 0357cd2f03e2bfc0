//! Ask-Video - chat with a video's subtitles
//!
//! A CLI tool that downloads a video's caption track and starts an
//! interactive, streaming chat session grounded in the transcript.
//!
//! # Overview
//!
//! Ask-Video allows you to:
//! - Extract subtitles from YouTube and Bilibili videos (manual captions
//!   preferred, automatic captions as fallback)
//! - Normalize timed-text captions into a `[MM:SS]`-prefixed transcript
//! - Ask questions about the video and get streamed, transcript-grounded
//!   answers
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Environment-based configuration
//! - `captions` - Caption listing, selection, download and normalization
//! - `chat` - Model provider abstraction and the conversation session
//! - `openai` - OpenAI client construction
//! - `cli` - Argument parsing and terminal output helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use ask_video::captions::{self, YtDlpProvider};
//! use ask_video::chat::{ChatSession, OpenAiChat, SessionStore};
//! use ask_video::config::Settings;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::from_env()?;
//!     let provider = YtDlpProvider::new();
//!
//!     let transcript = captions::download_subtitles(&provider, "https://youtu.be/dQw4w9WgXcQ")
//!         .await?
//!         .expect("video has no subtitles");
//!
//!     let model = OpenAiChat::new(&settings, &settings.model);
//!     let mut session = ChatSession::new(Arc::new(model), SessionStore::new(), &transcript);
//!     session.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod captions;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;

pub use error::{AskVideoError, Result};

//! Error types for ask-video.

use thiserror::Error;

/// Library-level error type for ask-video operations.
#[derive(Error, Debug)]
pub enum AskVideoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Caption source error: {0}")]
    CaptionSource(String),

    #[error("Caption download failed: {0}")]
    Fetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),
}

/// Result type alias for ask-video operations.
pub type Result<T> = std::result::Result<T, AskVideoError>;

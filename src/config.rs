//! Configuration loading for ask-video.
//!
//! All configuration comes from the process environment. The API key is
//! required; the base URL and model identifier have documented defaults.

use crate::error::{AskVideoError, Result};

/// Default OpenAI-compatible API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Runtime settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// API key for the model provider (required).
    pub api_key: String,
    /// Base URL of the OpenAI-compatible endpoint.
    pub base_url: String,
    /// Chat model identifier.
    pub model: String,
}

impl Settings {
    /// Load settings from `OPENAI_API_KEY`, `OPENAI_BASE_URL` and
    /// `OPENAI_MODEL_ID`.
    ///
    /// Fails fast with a clear message if the API key is missing or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var("OPENAI_API_KEY").ok(),
            std::env::var("OPENAI_BASE_URL").ok(),
            std::env::var("OPENAI_MODEL_ID").ok(),
        )
    }

    fn from_vars(
        api_key: Option<String>,
        base_url: Option<String>,
        model: Option<String>,
    ) -> Result<Self> {
        let api_key = match api_key {
            Some(key) if !key.is_empty() => key,
            _ => {
                return Err(AskVideoError::Config(
                    "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'"
                        .to_string(),
                ))
            }
        };

        Ok(Self {
            api_key,
            base_url: base_url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}

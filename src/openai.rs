//! OpenAI client configuration with sensible defaults.

use crate::config::Settings;
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client from the resolved settings.
///
/// Uses a 5-minute timeout to prevent hung API calls.
pub fn create_client(settings: &Settings) -> Client<OpenAIConfig> {
    create_client_with_timeout(settings, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an OpenAI client with a custom timeout.
pub fn create_client_with_timeout(
    settings: &Settings,
    timeout: Duration,
) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    let config = OpenAIConfig::new()
        .with_api_key(settings.api_key.clone())
        .with_api_base(settings.base_url.clone());

    Client::with_config(config).with_http_client(http_client)
}

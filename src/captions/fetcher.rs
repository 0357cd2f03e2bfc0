//! Raw caption payload retrieval.

use crate::error::{AskVideoError, Result};
use reqwest::header;
use tracing::debug;

/// Caption CDNs reject requests without a browser-looking User-Agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Download the raw caption payload from a variant URL.
///
/// Single best-effort attempt, no retry. Any transport failure or non-success
/// status is fatal to the run.
pub async fn fetch_captions(url: &str) -> Result<String> {
    debug!("Fetching captions from {}", url);

    let client = reqwest::Client::new();

    let response = client
        .get(url)
        .header(header::USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await
        .map_err(|e| AskVideoError::Fetch(format!("request failed: {}", e)))?
        .error_for_status()
        .map_err(|e| AskVideoError::Fetch(format!("server returned an error: {}", e)))?;

    response
        .text()
        .await
        .map_err(|e| AskVideoError::Fetch(format!("failed to read response body: {}", e)))
}

//! yt-dlp caption provider.
//!
//! Shells out to yt-dlp to enumerate the manual and automatic caption tracks
//! a video exposes. Works for any site yt-dlp supports (YouTube, Bilibili, ...).

use super::{CaptionProvider, CaptionSet, CaptionTrack, CaptionVariant};
use crate::error::{AskVideoError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tokio::process::Command;
use tracing::debug;

/// Caption provider backed by the yt-dlp binary.
pub struct YtDlpProvider;

impl YtDlpProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YtDlpProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Subset of yt-dlp's `--dump-json` output we care about.
#[derive(Debug, Deserialize)]
struct VideoInfo {
    #[serde(default)]
    subtitles: HashMap<String, Vec<CaptionVariant>>,
    #[serde(default)]
    automatic_captions: HashMap<String, Vec<CaptionVariant>>,
}

#[async_trait]
impl CaptionProvider for YtDlpProvider {
    async fn list_captions(&self, url: &str) -> Result<CaptionSet> {
        let output = Command::new("yt-dlp")
            .args([
                "--dump-json",
                "--no-download",
                "--no-playlist",
                "--no-warnings",
                url,
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    AskVideoError::ToolNotFound("yt-dlp".to_string())
                } else {
                    AskVideoError::CaptionSource(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AskVideoError::CaptionSource(format!(
                "yt-dlp failed for {}: {}",
                url,
                stderr.trim()
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        parse_caption_set(&json_str)
    }
}

/// Parse yt-dlp's JSON dump into a [`CaptionSet`].
fn parse_caption_set(json_str: &str) -> Result<CaptionSet> {
    let info: VideoInfo = serde_json::from_str(json_str).map_err(|e| {
        AskVideoError::CaptionSource(format!("Failed to parse yt-dlp output: {}", e))
    })?;

    debug!(
        "Found {} manual and {} automatic caption languages",
        info.subtitles.len(),
        info.automatic_captions.len()
    );

    Ok(CaptionSet {
        manual: into_tracks(info.subtitles),
        automatic: into_tracks(info.automatic_captions),
    })
}

fn into_tracks(raw: HashMap<String, Vec<CaptionVariant>>) -> HashMap<String, CaptionTrack> {
    raw.into_iter()
        .map(|(language, variants)| {
            let track = CaptionTrack {
                language: language.clone(),
                variants,
            };
            (language, track)
        })
        .collect()
}

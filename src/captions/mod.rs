//! Subtitle acquisition and normalization.
//!
//! Locates the caption tracks a video exposes, picks one according to a
//! deterministic language/format priority, downloads it, and normalizes it
//! into a plain-text transcript with `[MM:SS]` line prefixes.

mod fetcher;
mod format;
mod selector;
mod youtube;

pub use fetcher::fetch_captions;
pub use format::{format_captions, CaptionFormat};
pub use selector::{select_track, select_variant};
pub use youtube::YtDlpProvider;

use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// One downloadable rendition of a caption track.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptionVariant {
    /// Format tag as reported by the platform (e.g. "vtt", "json3", "srv3").
    #[serde(rename = "ext")]
    pub format: String,
    /// Retrieval URL for this rendition.
    pub url: String,
}

/// One complete set of subtitle cues in one language.
#[derive(Debug, Clone)]
pub struct CaptionTrack {
    /// Language code (e.g. "en", "zh-Hans").
    pub language: String,
    /// Available renditions, in platform order.
    pub variants: Vec<CaptionVariant>,
}

/// All caption tracks a video exposes, split by origin.
#[derive(Debug, Clone, Default)]
pub struct CaptionSet {
    /// Human-authored tracks, keyed by language code.
    pub manual: HashMap<String, CaptionTrack>,
    /// Machine-generated tracks, keyed by language code.
    pub automatic: HashMap<String, CaptionTrack>,
}

impl CaptionSet {
    /// True when the video exposes no caption tracks at all.
    pub fn is_empty(&self) -> bool {
        self.manual.is_empty() && self.automatic.is_empty()
    }
}

/// Trait for caption platform providers.
#[async_trait]
pub trait CaptionProvider: Send + Sync {
    /// List the caption tracks available for a video URL.
    async fn list_captions(&self, url: &str) -> Result<CaptionSet>;
}

/// Download and normalize subtitles for a video URL.
///
/// Returns `Ok(None)` when the video has no usable caption track, which the
/// caller must treat as "no subtitles available".
pub async fn download_subtitles(
    provider: &dyn CaptionProvider,
    url: &str,
) -> Result<Option<String>> {
    let caption_set = provider.list_captions(url).await?;

    let Some(track) = select_track(&caption_set) else {
        info!("No caption tracks found for this video");
        return Ok(None);
    };

    let Some(variant) = select_variant(track) else {
        info!("Caption track '{}' has no downloadable variants", track.language);
        return Ok(None);
    };

    debug!(
        "Selected caption track '{}' in format '{}'",
        track.language, variant.format
    );

    let raw = fetch_captions(&variant.url).await?;
    let transcript = format_captions(&raw, CaptionFormat::from_tag(&variant.format));

    if transcript.is_empty() {
        return Ok(None);
    }

    Ok(Some(transcript))
}

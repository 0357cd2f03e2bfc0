//! Caption track and variant selection.
//!
//! Selection is a strict two-tier fallback: language priority decides the
//! track, then format preference decides the variant within that track.
//! Format preference never overrides language priority.

use super::{CaptionSet, CaptionTrack, CaptionVariant};

/// Preferred languages, highest priority first.
const PREFERRED_LANGUAGES: [&str; 4] = ["zh-Hans", "zh-Hant", "zh", "en"];

/// Formats we know how to decode or pass through cleanly.
const PREFERRED_FORMATS: [&str; 3] = ["vtt", "srv3", "json3"];

/// Pick one caption track from the available set.
///
/// Manual tracks are scanned across the whole language priority list before
/// any automatic track is considered. If no track matches the priority list,
/// falls back to an arbitrary manual track, then an arbitrary automatic one.
/// Returns `None` only when the set is empty.
pub fn select_track(set: &CaptionSet) -> Option<&CaptionTrack> {
    for lang in PREFERRED_LANGUAGES {
        if let Some(track) = set.manual.get(lang) {
            return Some(track);
        }
    }

    for lang in PREFERRED_LANGUAGES {
        if let Some(track) = set.automatic.get(lang) {
            return Some(track);
        }
    }

    set.manual
        .values()
        .next()
        .or_else(|| set.automatic.values().next())
}

/// Pick one variant from a caption track.
///
/// Scans the variant list in platform order and returns the first whose
/// format is in the preferred set; otherwise the first variant. Returns
/// `None` only when the track has no variants.
pub fn select_variant(track: &CaptionTrack) -> Option<&CaptionVariant> {
    track
        .variants
        .iter()
        .find(|v| PREFERRED_FORMATS.contains(&v.format.as_str()))
        .or_else(|| track.variants.first())
}

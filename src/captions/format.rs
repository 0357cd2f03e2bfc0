//! Caption normalization into a plain-text transcript.
//!
//! Known encodings are a closed enum; dispatch is a pure function. Adding an
//! encoding means adding a variant and a handler.

use serde::Deserialize;
use tracing::warn;

/// Caption encodings we distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFormat {
    /// YouTube timed-text JSON ("json3"): events with start times and segments.
    TimedTextJson,
    /// Anything else (vtt, srt, srv3, ...) is passed through as-is.
    Passthrough,
}

impl CaptionFormat {
    /// Classify a platform format tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "json3" => CaptionFormat::TimedTextJson,
            _ => CaptionFormat::Passthrough,
        }
    }
}

/// Normalize raw caption content into transcript text.
pub fn format_captions(raw: &str, format: CaptionFormat) -> String {
    match format {
        CaptionFormat::TimedTextJson => format_timed_text_json(raw),
        CaptionFormat::Passthrough => raw.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct TimedTextDoc {
    events: Option<Vec<TimedTextEvent>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs", default)]
    start_ms: u64,
    #[serde(default)]
    segs: Vec<TimedTextSeg>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

/// Render timed-text JSON as `[MM:SS] text` lines, in event order.
///
/// There is no hour field; past 99 minutes the minute column just widens.
/// Malformed input degrades to the raw content rather than failing.
fn format_timed_text_json(raw: &str) -> String {
    let doc: TimedTextDoc = match serde_json::from_str(raw) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("Failed to parse caption content as JSON, keeping it raw: {}", e);
            return raw.to_string();
        }
    };

    // Valid JSON without an events array is some other encoding already.
    let Some(events) = doc.events else {
        return raw.to_string();
    };

    let mut lines = Vec::new();

    for event in events {
        let text: String = event
            .segs
            .iter()
            .map(|seg| seg.utf8.as_str())
            .filter(|t| !t.is_empty() && *t != "\n")
            .collect();
        let text = text.trim();

        if text.is_empty() {
            continue;
        }

        let total_seconds = event.start_ms / 1000;
        lines.push(format!(
            "[{:02}:{:02}] {}",
            total_seconds / 60,
            total_seconds % 60,
            text
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_text_event_renders_timestamped_line() {
        let raw = r#"{"events":[{"tStartMs":65000,"segs":[{"utf8":"hello"}]}]}"#;
        assert_eq!(
            format_captions(raw, CaptionFormat::TimedTextJson),
            "[01:05] hello"
        );
    }

    #[test]
    fn test_segments_joined_and_trimmed() {
        let raw = r#"{"events":[
            {"tStartMs":0,"segs":[{"utf8":"hello "},{"utf8":"world"}]},
            {"tStartMs":600000,"segs":[{"utf8":"ten minutes in"}]}
        ]}"#;
        assert_eq!(
            format_captions(raw, CaptionFormat::TimedTextJson),
            "[00:00] hello world\n[10:00] ten minutes in"
        );
    }

    #[test]
    fn test_newline_only_segment_produces_no_line() {
        let raw = r#"{"events":[{"tStartMs":1000,"segs":[{"utf8":"\n"}]}]}"#;
        assert_eq!(format_captions(raw, CaptionFormat::TimedTextJson), "");
    }

    #[test]
    fn test_non_json_input_passes_through() {
        let raw = "WEBVTT\n\n00:00.000 --> 00:02.000\nhello";
        assert_eq!(format_captions(raw, CaptionFormat::TimedTextJson), raw);
    }

    #[test]
    fn test_json_without_events_passes_through() {
        let raw = r#"{"wireMagic":"pb3"}"#;
        assert_eq!(format_captions(raw, CaptionFormat::TimedTextJson), raw);
    }

    #[test]
    fn test_passthrough_format_untouched() {
        let raw = "1\n00:00:00,000 --> 00:00:02,000\nhello\n";
        assert_eq!(format_captions(raw, CaptionFormat::Passthrough), raw);
    }

    #[test]
    fn test_format_tag_classification() {
        assert_eq!(CaptionFormat::from_tag("json3"), CaptionFormat::TimedTextJson);
        assert_eq!(CaptionFormat::from_tag("vtt"), CaptionFormat::Passthrough);
        assert_eq!(CaptionFormat::from_tag("srv3"), CaptionFormat::Passthrough);
        assert_eq!(CaptionFormat::from_tag("srt"), CaptionFormat::Passthrough);
    }

    #[test]
    fn test_minutes_wrap_without_hour_field() {
        // 100 minutes renders as [100:00]; there is no hour component.
        let raw = r#"{"events":[{"tStartMs":6000000,"segs":[{"utf8":"late"}]}]}"#;
        assert_eq!(
            format_captions(raw, CaptionFormat::TimedTextJson),
            "[100:00] late"
        );
    }
}

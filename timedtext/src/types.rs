use serde::{Deserialize, Serialize};

/// One available caption track for a video, as listed by the upstream
/// track-list document.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionTrack {
    /// Language code as declared upstream (e.g. "en", "nl", "pt-BR").
    pub lang_code: String,
    /// Generation method: "asr" for auto-generated, empty for manual.
    pub kind: String,
    /// True only when the upstream `default` attribute is exactly "true".
    pub is_default: bool,
    /// Human-readable track name, when upstream provides one.
    pub name: Option<String>,
}

impl CaptionTrack {
    /// Whether this track was auto-generated by speech recognition.
    pub fn is_asr(&self) -> bool {
        self.kind.eq_ignore_ascii_case("asr")
    }
}

/// A single timed text segment of a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptLine {
    /// Start offset in seconds, never negative.
    pub start: f64,
    /// Duration in seconds, never negative.
    pub duration: f64,
    /// Decoded caption text, non-blank after trimming.
    pub text: String,
}

/// Result of running the fetch pipeline for one video.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptOutcome {
    /// The track list parsed but contained no caption tracks.
    NoCaptions,
    /// Captions exist; `lines` may still be empty if every segment was
    /// blank after decoding.
    Captions {
        /// Language code of the selected track.
        lang: String,
        lines: Vec<TranscriptLine>,
    },
}

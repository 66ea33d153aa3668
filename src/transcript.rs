use serde::{Deserialize, Serialize};

/// A fully transcribed input: the complete text plus its timed segments.
///
/// Produced once per input file by an [`crate::engine::Engine`] and treated as
/// read-only afterwards. Serializes to the JSON output format, and
/// deserializes back so generated JSON round-trips.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Transcript {
    /// Concatenated segment text with surrounding whitespace trimmed.
    pub text: String,

    /// Timed segments in playback order.
    pub segments: Vec<Segment>,
}

/// A contiguous span of audio with a single transcribed text span.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Segment {
    pub start_seconds: f32,
    pub end_seconds: f32,
    pub text: String,

    /// Per-word timing, present only when word timestamps were requested and
    /// the engine produced them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<Word>>,
}

/// A single word with its own timing, within a segment.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Word {
    pub word: String,
    pub start_seconds: f32,
    pub end_seconds: f32,
}

impl Transcript {
    /// Assemble a transcript from engine segments.
    ///
    /// Whisper segment text carries a leading space, so plain concatenation
    /// reconstructs the full text; we trim the ends.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<String>()
            .trim()
            .to_owned();

        Self { text, segments }
    }

    /// Whether the engine produced any segments at all.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

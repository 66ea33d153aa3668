/// The supported output formats for a serialized transcript.
///
/// Why this exists:
/// - We want a single, strongly-typed representation of output formats
///   across the CLI and library code.
/// - Using an enum avoids stringly-typed conditionals and keeps format
///   selection explicit and discoverable.
///
/// Integration notes:
/// - With the `cli` feature, `ValueEnum` allows this enum to be used directly
///   as a clap flag, which rejects unknown format names at parse time.
/// - Each variant maps to a concrete `TranscriptEncoder` implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Plain text: the full transcript, one final newline.
    Txt,

    /// SubRip subtitles: numbered blocks with comma-millisecond timestamps.
    Srt,

    /// WebVTT subtitles.
    Vtt,

    /// Tab-separated `start\tend\ttext` rows in milliseconds.
    Tsv,

    /// The full structured transcript as JSON.
    Json,
}

impl OutputFormat {
    /// File extension written for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::Tsv => "tsv",
            Self::Json => "json",
        }
    }
}

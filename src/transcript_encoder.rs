use anyhow::Result;

use crate::transcript::Transcript;

/// Serializer for one output format.
///
/// Encoders write into a caller-supplied `Write` and must be deterministic:
/// byte-identical output for identical transcripts across runs. `encode`
/// consumes the whole transcript at once, since the result is fully in memory
/// by the time any output is written, and formats like txt (full text) and
/// JSON (whole structure) aren't segment-streamable anyway.
pub trait TranscriptEncoder {
    fn encode(&mut self, transcript: &Transcript) -> Result<()>;

    /// Flush the underlying writer. Idempotent; no writes are accepted after.
    fn close(&mut self) -> Result<()>;
}

use anyhow::Result;
use std::io::Write;

use crate::transcript::Transcript;
use crate::transcript_encoder::TranscriptEncoder;

/// A `TranscriptEncoder` that writes the full structured transcript as JSON.
///
/// Design:
/// - We stream the transcript directly into the writer via `serde_json`, so
///   there is no intermediate `String`.
/// - The output parses back into a [`Transcript`] equal to the original,
///   including word-level timings when present.
pub struct JsonEncoder<W: Write> {
    /// The underlying writer we stream JSON into.
    w: W,

    /// Whether the encoder has been closed.
    /// Once closed, no further writes are allowed.
    closed: bool,
}

impl<W: Write> JsonEncoder<W> {
    pub fn new(w: W) -> Self {
        Self { w, closed: false }
    }
}

impl<W: Write> TranscriptEncoder for JsonEncoder<W> {
    fn encode(&mut self, transcript: &Transcript) -> Result<()> {
        if self.closed {
            anyhow::bail!("cannot encode: encoder is already closed");
        }

        serde_json::to_writer(&mut self.w, transcript)?;
        self.w.write_all(b"\n")?;
        self.w.flush()?;
        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;
        Ok(())
    }
}

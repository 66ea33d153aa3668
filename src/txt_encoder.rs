use anyhow::Result;
use std::io::Write;

use crate::transcript::Transcript;
use crate::transcript_encoder::TranscriptEncoder;

/// A `TranscriptEncoder` that writes the plain transcript text.
pub struct TxtEncoder<W: Write> {
    w: W,
    closed: bool,
}

impl<W: Write> TxtEncoder<W> {
    pub fn new(w: W) -> Self {
        Self { w, closed: false }
    }
}

impl<W: Write> TranscriptEncoder for TxtEncoder<W> {
    /// Write the trimmed full text followed by one newline.
    fn encode(&mut self, transcript: &Transcript) -> Result<()> {
        if self.closed {
            anyhow::bail!("cannot encode: encoder is already closed");
        }

        writeln!(&mut self.w, "{}", transcript.text.trim())?;
        self.w.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;
        Ok(())
    }
}

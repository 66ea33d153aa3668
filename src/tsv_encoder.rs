use anyhow::Result;
use std::io::Write;

use crate::transcript::Transcript;
use crate::transcript_encoder::TranscriptEncoder;

/// A `TranscriptEncoder` that writes tab-separated segment rows.
///
/// Layout: a `start\tend\ttext` header, then one row per segment with start
/// and end in integer milliseconds. Tabs and newlines inside segment text are
/// replaced with spaces so rows stay parseable.
pub struct TsvEncoder<W: Write> {
    w: W,
    closed: bool,
}

impl<W: Write> TsvEncoder<W> {
    pub fn new(w: W) -> Self {
        Self { w, closed: false }
    }
}

impl<W: Write> TranscriptEncoder for TsvEncoder<W> {
    fn encode(&mut self, transcript: &Transcript) -> Result<()> {
        if self.closed {
            anyhow::bail!("cannot encode: encoder is already closed");
        }

        writeln!(&mut self.w, "start\tend\ttext")?;

        for seg in &transcript.segments {
            let start_ms = to_millis(seg.start_seconds);
            let end_ms = to_millis(seg.end_seconds);
            let text = sanitize(seg.text.trim());
            writeln!(&mut self.w, "{start_ms}\t{end_ms}\t{text}")?;
        }

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

fn to_millis(seconds: f32) -> u64 {
    (seconds * 1000.0).round() as u64
}

fn sanitize(text: &str) -> String {
    text.replace(['\t', '\n', '\r'], " ")
}

use anyhow::Result;
use std::io::Write;

use crate::transcript::Transcript;
use crate::transcript_encoder::TranscriptEncoder;

/// A `TranscriptEncoder` that writes WebVTT subtitles.
///
/// Design:
/// - Same block structure as SRT, minus the block numbers, plus the mandatory
///   `WEBVTT` header.
/// - Timestamps use `.` before the milliseconds where SRT uses `,`.
pub struct VttEncoder<W: Write> {
    /// The underlying writer we stream VTT into.
    w: W,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> VttEncoder<W> {
    /// Create a new VTT encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self { w, closed: false }
    }
}

impl<W: Write> TranscriptEncoder for VttEncoder<W> {
    fn encode(&mut self, transcript: &Transcript) -> Result<()> {
        if self.closed {
            anyhow::bail!("cannot encode: encoder is already closed");
        }

        // WebVTT files begin with a mandatory header line followed by a blank line.
        self.w.write_all(b"WEBVTT\n\n")?;

        for seg in &transcript.segments {
            let start = format_timestamp_vtt(seg.start_seconds);
            let end = format_timestamp_vtt(seg.end_seconds);

            // Cue timing line, cue text, blank line separator.
            writeln!(&mut self.w, "{start} --> {end}")?;
            writeln!(&mut self.w, "{}", seg.text.trim())?;
            writeln!(&mut self.w)?;
        }

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

/// Format seconds into a WebVTT timestamp (`HH:MM:SS.mmm`).
///
/// Rounding policy:
/// - We round to the nearest millisecond to reduce drift when converting from `f32`.
fn format_timestamp_vtt(seconds: f32) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;

    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;

    let s = total_s % 60;
    let total_m = total_s / 60;

    let m = total_m % 60;
    let h = total_m / 60;

    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

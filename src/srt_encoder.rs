use anyhow::Result;
use std::io::Write;

use crate::transcript::Transcript;
use crate::transcript_encoder::TranscriptEncoder;

/// A `TranscriptEncoder` that writes SubRip (`.srt`) subtitles.
///
/// One numbered block per segment:
///
/// ```text
/// 1
/// 00:00:00,000 --> 00:00:01,500
/// Hello there.
///
/// ```
pub struct SrtEncoder<W: Write> {
    w: W,
    closed: bool,
}

impl<W: Write> SrtEncoder<W> {
    pub fn new(w: W) -> Self {
        Self { w, closed: false }
    }
}

impl<W: Write> TranscriptEncoder for SrtEncoder<W> {
    fn encode(&mut self, transcript: &Transcript) -> Result<()> {
        if self.closed {
            anyhow::bail!("cannot encode: encoder is already closed");
        }

        // SRT blocks are numbered from 1.
        for (idx, seg) in transcript.segments.iter().enumerate() {
            let start = format_timestamp_srt(seg.start_seconds);
            let end = format_timestamp_srt(seg.end_seconds);

            writeln!(&mut self.w, "{}", idx + 1)?;
            writeln!(&mut self.w, "{start} --> {end}")?;
            writeln!(&mut self.w, "{}", seg.text.trim())?;
            writeln!(&mut self.w)?;
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

/// Format seconds into an SRT timestamp (`HH:MM:SS,mmm`).
///
/// Rounding policy:
/// - We round to the nearest millisecond to reduce drift when converting from `f32`.
fn format_timestamp_srt(seconds: f32) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;

    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;

    let s = total_s % 60;
    let total_m = total_s / 60;

    let m = total_m % 60;
    let h = total_m / 60;

    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

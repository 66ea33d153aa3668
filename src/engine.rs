use std::path::Path;

use crate::Result;
use crate::opts::TranscribeOpts;
use crate::transcript::Transcript;

/// Pluggable ASR engine used by [`crate::scrivener::Scrivener`].
///
/// An engine is responsible for turning one audio file into a [`Transcript`]
/// according to the supplied options. The loaded model is part of the engine's
/// own state, so constructing an engine is expensive and transcribing with it
/// is not.
///
/// `transcribe` takes `&mut self` because whisper_rs requires mutable access
/// to run inference state; single-threaded callers (the only supported mode)
/// are unaffected.
pub trait Engine {
    /// Transcribe the audio file at `audio_path`.
    ///
    /// This is a long-running blocking call; there is no cancellation or
    /// timeout. Implementations report failures as
    /// [`crate::Error::Transcription`] naming the offending path.
    fn transcribe(&mut self, audio_path: &Path, opts: &TranscribeOpts) -> Result<Transcript>;
}

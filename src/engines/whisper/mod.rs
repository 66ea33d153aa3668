use std::path::Path;

use whisper_rs::WhisperContext;

use crate::audio;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::opts::TranscribeOpts;
use crate::transcript::Transcript;

mod ctx;
mod logging;
mod segments;
mod token;

/// Built-in engine powered by `whisper-rs` / whisper.cpp.
///
/// Loading the model is the expensive part, so a `WhisperEngine` is
/// constructed once per process and reused for every input file.
pub struct WhisperEngine {
    ctx: WhisperContext,
}

impl WhisperEngine {
    /// Load a whisper.cpp model from disk and initialize the engine.
    ///
    /// We fail fast here so a bad model path is reported before any audio
    /// work starts.
    pub fn new(model_path: &Path) -> Result<Self> {
        let ctx = ctx::get_context(model_path)
            .map_err(|err| Error::engine_load(model_path.to_string_lossy(), &err))?;
        Ok(Self { ctx })
    }

    /// Access the underlying Whisper context.
    ///
    /// This is primarily intended for advanced or experimental use-cases.
    pub fn context(&self) -> &WhisperContext {
        &self.ctx
    }
}

impl Engine for WhisperEngine {
    fn transcribe(&mut self, audio_path: &Path, opts: &TranscribeOpts) -> Result<Transcript> {
        let samples = audio::load_mono_16k(audio_path)
            .map_err(|err| Error::transcription(audio_path, &err))?;

        // Whisper rejects empty buffers; an audio file with no decodable
        // samples yields an empty transcript instead.
        if samples.is_empty() {
            return Ok(Transcript::from_segments(Vec::new()));
        }

        let segments = segments::run_full(&self.ctx, opts, &samples)
            .map_err(|err| Error::transcription(audio_path, &err))?;

        Ok(Transcript::from_segments(segments))
    }
}

//! High-level API for running batch transcriptions.
//!
//! We expose a single, ergonomic entry point (`Scrivener`) that wires up
//! model loading, per-file validation, the engine call, and output writing.
//!
//! The intent is:
//! - We load the model once (expensive).
//! - We reuse the engine to transcribe every input in a run.
//! - One bad input does not abort the batch: failures are collected into the
//!   run summary and the remaining files are still processed.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::engine::Engine;
use crate::engines::whisper::WhisperEngine;
use crate::error::{Error, Result};
use crate::model;
use crate::opts::TranscribeOpts;
use crate::output::{self, OutputOpts};

/// The batch orchestrator.
///
/// `Scrivener` owns the long-lived engine (and with it, the loaded model) for
/// the lifetime of the process. There is no hidden global state: the handle
/// lives here and is handed to each transcription call in turn.
///
/// Typical usage:
/// - Construct once (model loading happens here).
/// - Call `run` with the full input list.
pub struct Scrivener<E: Engine = WhisperEngine> {
    engine: E,
}

impl Scrivener<WhisperEngine> {
    /// Resolve a model name and load the built-in Whisper engine.
    ///
    /// We fail fast if the model cannot be resolved or loaded, so a bad
    /// `--model` is reported before any input file is touched.
    pub fn new(model: &str, model_dir: &Path) -> Result<Self> {
        let model_path = model::resolve_model_path(model, model_dir)?;
        info!(model = %model_path.display(), "loading model");
        let engine = WhisperEngine::new(&model_path)?;
        Ok(Self::with_engine(engine))
    }
}

impl<E: Engine> Scrivener<E> {
    /// Create an orchestrator around a custom engine.
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// Transcribe every input, in order, writing each requested format.
    ///
    /// Returns `Err` only for invalid configuration (no inputs, no formats);
    /// per-file failures are recorded in the summary so one corrupt or
    /// missing file cannot sink the rest of the batch.
    pub fn run(
        &mut self,
        inputs: &[PathBuf],
        opts: &TranscribeOpts,
        output: &OutputOpts,
    ) -> Result<RunSummary> {
        if inputs.is_empty() {
            return Err(Error::usage("at least one input file is required"));
        }
        if output.formats.is_empty() {
            return Err(Error::usage("at least one output format is required"));
        }

        let mut summary = RunSummary::default();

        for input in inputs {
            match self.process_one(input, opts, output) {
                Ok(written) => {
                    info!(input = %input.display(), files = written.len(), "transcribed");
                    summary.succeeded.push(input.clone());
                    summary.written.extend(written);
                }
                Err(err) => {
                    warn!(input = %input.display(), error = %err, "skipping input");
                    summary.failed.push((input.clone(), err));
                }
            }
        }

        Ok(summary)
    }

    fn process_one(
        &mut self,
        input: &Path,
        opts: &TranscribeOpts,
        output: &OutputOpts,
    ) -> Result<Vec<PathBuf>> {
        check_readable(input)?;

        info!(input = %input.display(), "transcribing");
        let transcript = self.engine.transcribe(input, opts)?;

        output::write_transcript(&transcript, input, output)
    }

    /// Access the configured engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Access the configured engine mutably.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Inputs that were transcribed and fully written.
    pub succeeded: Vec<PathBuf>,

    /// Inputs that failed, with the error that stopped them.
    pub failed: Vec<(PathBuf, Error)>,

    /// Every output file written, in processing order.
    pub written: Vec<PathBuf>,
}

impl RunSummary {
    /// The process exit code for this run: 0 when every file succeeded,
    /// 2 when any file failed.
    pub fn exit_code(&self) -> u8 {
        if self.failed.is_empty() { 0 } else { 2 }
    }
}

fn check_readable(path: &Path) -> Result<()> {
    if let Err(err) = std::fs::File::open(path) {
        return Err(Error::input(path, &err));
    }

    if !path.is_file() {
        return Err(Error::Input {
            path: path.to_path_buf(),
            reason: "not a regular file".to_owned(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_is_zero_without_failures() {
        let summary = RunSummary::default();
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn exit_code_is_two_with_any_failure() {
        let mut summary = RunSummary::default();
        summary
            .failed
            .push((PathBuf::from("a.wav"), Error::usage("boom")));
        assert_eq!(summary.exit_code(), 2);
    }

    #[test]
    fn check_readable_rejects_missing_files_and_directories() -> anyhow::Result<()> {
        let err = check_readable(Path::new("/no/such/file.wav")).unwrap_err();
        assert!(matches!(err, Error::Input { .. }));

        let dir = tempfile::tempdir()?;
        let err = check_readable(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Input { .. }));
        Ok(())
    }
}

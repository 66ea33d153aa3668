use std::path::{Path, PathBuf};

use thiserror::Error;

/// Scrivener's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Scrivener's crate-wide error type.
///
/// Variants follow the failure taxonomy of the tool:
/// - `Usage` is a caller mistake and maps to exit code 1.
/// - The remaining variants are per-file (or per-run, for `EngineLoad`)
///   failures and map to exit code 2.
///
/// Engine and decoder internals use `anyhow` for context chaining; errors are
/// flattened into this taxonomy at the public seams so downstream consumers
/// aren't forced to adopt `anyhow` in their own APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid invocation: bad flag values, no inputs, empty format set.
    #[error("{0}")]
    Usage(String),

    /// Input path does not exist or is not a readable file.
    #[error("input '{path}' is missing or unreadable: {reason}")]
    Input { path: PathBuf, reason: String },

    /// The engine or its model could not be initialized.
    #[error("failed to load model '{model}': {reason}")]
    EngineLoad { model: String, reason: String },

    /// The engine failed mid-decode for one input.
    #[error("transcription failed for '{path}': {reason}")]
    Transcription { path: PathBuf, reason: String },

    /// Output directory could not be created, or a write failed.
    #[error("failed to write output for '{path}': {reason}")]
    Output { path: PathBuf, reason: String },
}

impl Error {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    pub fn input(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Input {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    pub fn engine_load(model: impl Into<String>, err: &anyhow::Error) -> Self {
        Self::EngineLoad {
            model: model.into(),
            reason: format!("{err:#}"),
        }
    }

    pub fn transcription(path: impl AsRef<Path>, err: &anyhow::Error) -> Self {
        Self::Transcription {
            path: path.as_ref().to_path_buf(),
            reason: format!("{err:#}"),
        }
    }

    pub fn output(path: impl AsRef<Path>, err: &anyhow::Error) -> Self {
        Self::Output {
            path: path.as_ref().to_path_buf(),
            reason: format!("{err:#}"),
        }
    }

    /// The process exit code this error maps to.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 1,
            _ => 2,
        }
    }
}

//! `scrivener` — a batch transcription tool built on top of Whisper.
//!
//! This crate provides:
//! - Model loading and context management
//! - Audio decoding into Whisper's expected sample format
//! - A batch orchestrator that transcribes many files with one loaded model
//! - Pluggable output encoders (txt, SRT, WebVTT, TSV, JSON)
//!
//! The library is designed to back the `scrivener-cli` binary, but the batch
//! orchestrator is generic over its engine so other frontends (tests, batch
//! jobs) can drive it programmatically.

// High-level API (most consumers should start here).
pub mod opts;
pub mod scrivener;

// Crate-wide error taxonomy.
pub mod error;

// Transcript data structures.
pub mod transcript;

// Engine seam and the built-in Whisper implementation.
pub mod engine;
pub mod engines;

// Audio decoding.
pub mod audio;

// Model name resolution.
pub mod model;

// Output selection, encoder interfaces, and file writing.
pub mod output;
pub mod output_format;
pub mod transcript_encoder;

// Output encoders that serialize a transcript into various formats.
pub mod json_encoder;
pub mod srt_encoder;
pub mod tsv_encoder;
pub mod txt_encoder;
pub mod vtt_encoder;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

pub use error::{Error, Result};

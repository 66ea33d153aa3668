//! Engine implementations.
//!
//! Only the Whisper engine ships today, but the [`crate::engine::Engine`]
//! seam keeps the orchestrator (and its tests) independent of it.

pub mod whisper;

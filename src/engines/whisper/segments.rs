use anyhow::{Context, Result};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperState};

use crate::opts::TranscribeOpts;
use crate::transcript::Segment;

use super::token::{centiseconds_to_seconds, tokens_from_segment, words_from_tokens};

/// Search breadth used when the caller doesn't specify one, for both decode
/// modes (whisper's own default).
const DEFAULT_SEARCH_BREADTH: i32 = 5;

/// Run a full transcription pass over `samples` and collect the segments.
pub(super) fn run_full(
    ctx: &WhisperContext,
    opts: &TranscribeOpts,
    samples: &[f32],
) -> Result<Vec<Segment>> {
    let params = build_full_params(opts);

    let mut state = ctx
        .create_state()
        .context("failed to create whisper state")?;

    state
        .full(params, samples)
        .context("failed to run whisper full()")?;

    collect_segments(&state, opts.word_timestamps)
}

/// Map decode options onto whisper.cpp parameters.
///
/// Decode-mode selection follows openai-whisper: a nonzero temperature means
/// greedy sampling with `best_of` candidates; zero means beam search with
/// `beam_size`. The inactive mode's breadth parameter is ignored.
fn build_full_params(opts: &TranscribeOpts) -> FullParams<'_, '_> {
    let strategy = if opts.temperature > 0.0 {
        SamplingStrategy::Greedy {
            best_of: breadth(opts.best_of),
        }
    } else {
        SamplingStrategy::BeamSearch {
            beam_size: breadth(opts.beam_size),
            patience: 1.0,
        }
    };

    let mut params = FullParams::new(strategy);

    params.set_n_threads(num_cpus::get() as i32);
    params.set_translate(false);
    params.set_language(opts.language.as_deref());
    params.set_temperature(opts.temperature);
    if let Some(prompt) = opts.initial_prompt.as_deref() {
        params.set_initial_prompt(prompt);
    }
    params.set_no_context(true);
    params.set_single_segment(false);

    params.set_print_progress(false);
    params.set_print_special(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    params.set_token_timestamps(opts.word_timestamps);

    params
}

fn breadth(requested: Option<u32>) -> i32 {
    requested.map_or(DEFAULT_SEARCH_BREADTH, |n| n as i32)
}

fn collect_segments(state: &WhisperState, word_timestamps: bool) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();

    for whisper_segment in state.as_iter() {
        let text = whisper_segment
            .to_str()
            .context("failed to get segment text")?
            .to_owned();

        let words = if word_timestamps {
            let tokens = tokens_from_segment(&whisper_segment)?;
            Some(words_from_tokens(&tokens))
        } else {
            None
        };

        segments.push(Segment {
            // whisper segment timestamps are centiseconds
            start_seconds: centiseconds_to_seconds(whisper_segment.start_timestamp()),
            end_seconds: centiseconds_to_seconds(whisper_segment.end_timestamp()),
            text,
            words,
        });
    }

    Ok(segments)
}

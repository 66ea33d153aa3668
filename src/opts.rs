/// Options that control how a single transcription is decoded.
///
/// This struct represents *library-level configuration*, not CLI flags
/// directly. The CLI is responsible for mapping user input into this type so
/// that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (tests, batch jobs) can construct options programmatically
///
/// One instance is shared across every input file of a run.
#[derive(Debug, Clone)]
pub struct TranscribeOpts {
    /// Optional language hint (e.g. `"en"`, `"es"`).
    ///
    /// When `None`, we allow Whisper to auto-detect the spoken language.
    pub language: Option<String>,

    /// Sampling temperature in `[0.0, 1.0]`.
    ///
    /// `0.0` selects deterministic beam-search decoding; anything above zero
    /// switches the engine to greedy sampling.
    pub temperature: f32,

    /// Beam width for beam-search decoding. Ignored while sampling
    /// (`temperature > 0`). `None` means the engine default of 5.
    pub beam_size: Option<u32>,

    /// Number of candidates when sampling. Ignored during beam search.
    /// `None` means the engine default of 5.
    pub best_of: Option<u32>,

    /// Seed text that biases the decoder's style and vocabulary.
    pub initial_prompt: Option<String>,

    /// Whether to request per-word timing in the result.
    pub word_timestamps: bool,
}

impl Default for TranscribeOpts {
    fn default() -> Self {
        Self {
            language: None,
            temperature: 0.0,
            beam_size: None,
            best_of: None,
            initial_prompt: None,
            word_timestamps: false,
        }
    }
}

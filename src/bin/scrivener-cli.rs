use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::info;

use scrivener::error::Error;
use scrivener::model::{DEFAULT_MODEL, DEFAULT_MODEL_DIR};
use scrivener::opts::TranscribeOpts;
use scrivener::output::OutputOpts;
use scrivener::output_format::OutputFormat;
use scrivener::scrivener::Scrivener;

#[derive(Parser, Debug)]
#[command(name = "scrivener")]
#[command(version)]
#[command(about = "Transcribe audio files with Whisper and write txt/srt/vtt/tsv/json transcripts")]
struct Params {
    /// Input audio file(s), processed in order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Model variant (e.g. tiny, base.en, large-v3) or a path to a ggml file.
    #[arg(short = 'm', long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Directory where ggml models live.
    #[arg(long, alias = "model_dir", default_value = DEFAULT_MODEL_DIR)]
    model_dir: PathBuf,

    /// Spoken language code (e.g. en, es). Omit to auto-detect.
    #[arg(short = 'l', long)]
    language: Option<String>,

    /// Sampling temperature in [0, 1]. 0 selects deterministic beam search.
    #[arg(long, default_value_t = 0.0)]
    temperature: f32,

    /// Beam width for beam-search decoding.
    #[arg(long, alias = "beam_size")]
    beam_size: Option<u32>,

    /// Number of candidates when sampling (temperature > 0).
    #[arg(long, alias = "best_of")]
    best_of: Option<u32>,

    /// Seed text to bias the decoder's style and vocabulary.
    #[arg(long, alias = "initial_prompt")]
    initial_prompt: Option<String>,

    /// Request per-word timestamps (included in the json format).
    #[arg(long, alias = "word_timestamps", default_value_t = false)]
    word_timestamps: bool,

    /// Output formats to write, comma separated.
    #[arg(
        short = 'f',
        long,
        value_enum,
        value_delimiter = ',',
        default_value = "txt"
    )]
    formats: Vec<OutputFormat>,

    /// Directory for output files (created if missing).
    #[arg(short = 'o', long, alias = "output_dir", default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> ExitCode {
    // Unknown flags and bad values (including unrecognized --formats entries)
    // are usage errors: exit 1, before any model or audio work.
    let params = match Params::try_parse() {
        Ok(params) => params,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    scrivener::logging::init();

    match run(params) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(params: Params) -> Result<ExitCode, Error> {
    validate(&params)?;

    let opts = TranscribeOpts {
        language: params.language,
        temperature: params.temperature,
        beam_size: params.beam_size,
        best_of: params.best_of,
        initial_prompt: params.initial_prompt,
        word_timestamps: params.word_timestamps,
    };
    let output = OutputOpts {
        formats: dedup_formats(&params.formats),
        dir: params.output_dir,
    };

    let mut scrivener = Scrivener::new(&params.model, &params.model_dir)?;
    let summary = scrivener.run(&params.inputs, &opts, &output)?;

    info!(
        succeeded = summary.succeeded.len(),
        failed = summary.failed.len(),
        files_written = summary.written.len(),
        "done"
    );

    Ok(ExitCode::from(summary.exit_code()))
}

fn validate(params: &Params) -> Result<(), Error> {
    if !(0.0..=1.0).contains(&params.temperature) {
        return Err(Error::usage(format!(
            "temperature must be within [0, 1], got {}",
            params.temperature
        )));
    }
    Ok(())
}

/// Collapse repeated formats while preserving first-seen order.
fn dedup_formats(formats: &[OutputFormat]) -> Vec<OutputFormat> {
    let mut seen = Vec::with_capacity(formats.len());
    for format in formats {
        if !seen.contains(format) {
            seen.push(*format);
        }
    }
    seen
}

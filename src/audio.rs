//! Decode an audio file into mono `f32` samples at Whisper's expected rate.
//!
//! Responsibilities:
//! - Probe the container and pick a decodable audio track
//! - Decode packets into PCM, skipping corrupt frames
//! - Downmix to mono
//! - Resample to the target sample rate (when needed)
//!
//! Unlike a streaming pipeline, this module always decodes the whole file:
//! the transcript is assembled in memory anyway, so there is nothing to gain
//! from chunked emission here.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use rubato::{Resampler, SincFixedIn, WindowFunction};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Whisper's expected mono sample rate (Hz).
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Decode `path` into mono samples at [`TARGET_SAMPLE_RATE`].
pub fn load_mono_16k(path: &Path) -> Result<Vec<f32>> {
    let file = File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;

    let mss_opts = MediaSourceStreamOptions {
        // Symphonia expects a power-of-two buffer > 32KiB for good probing behavior.
        buffer_len: 256 * 1024,
    };
    let mss = MediaSourceStream::new(Box::new(file), mss_opts);

    // The file extension improves probe accuracy for ambiguous containers.
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let format_opts: FormatOptions = Default::default();
    let metadata_opts: MetadataOptions = Default::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .map_err(|e| anyhow!(e))
        .context("failed to probe media stream")?;

    let mut format = probed.format;

    // Track selection policy: first track that looks decodable (codec != NULL)
    // and has a known sample rate (required for the resampling decision).
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL && t.codec_params.sample_rate.is_some())
        .cloned()
        .ok_or_else(|| anyhow!("no audio track found"))?;

    let decoder_opts: DecoderOptions = Default::default();
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &decoder_opts)
        .map_err(|e| anyhow!(e))
        .context("failed to create decoder for audio track")?;

    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut mono = Vec::<f32>::new();
    let mut src_rate = 0u32;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            // IO errors mean end-of-stream for most containers.
            Err(SymphoniaError::IoError(_)) => break,
            Err(e) => return Err(anyhow!(e)).context("failed reading packet"),
        };

        if packet.track_id() != track.id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(buf) => buf,
            // Corrupted frame; decoding can continue.
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(SymphoniaError::IoError(_)) => break,
            Err(e) => return Err(anyhow!(e)).context("decoder failure"),
        };

        let spec = *decoded.spec();
        src_rate = spec.rate;
        let channels = spec.channels.count();
        if channels == 0 {
            bail!("decoded audio had zero channels");
        }

        let buf = sample_buf.get_or_insert_with(|| {
            SampleBuffer::<f32>::new(decoded.capacity() as u64, spec)
        });
        buf.copy_interleaved_ref(decoded);

        downmix_into_mono(buf.samples(), channels, &mut mono);
    }

    if mono.is_empty() || src_rate == TARGET_SAMPLE_RATE {
        return Ok(mono);
    }

    resample_to_target(&mono, src_rate)
}

/// Downmix interleaved samples into mono by averaging channels, appending to `out`.
fn downmix_into_mono(interleaved: &[f32], channels: usize, out: &mut Vec<f32>) {
    if channels == 1 {
        out.extend_from_slice(interleaved);
        return;
    }

    let frames = interleaved.len() / channels;
    out.reserve(frames);

    for f in 0..frames {
        let base = f * channels;
        let mut acc = 0.0;
        for c in 0..channels {
            acc += interleaved[base + c];
        }
        out.push(acc / channels as f32);
    }
}

/// Resample a mono buffer from `src_rate` to [`TARGET_SAMPLE_RATE`].
///
/// rubato expects exact input block sizes, so the tail is zero-padded and the
/// output trimmed back to the length the ratio predicts.
fn resample_to_target(mono_src: &[f32], src_rate: u32) -> Result<Vec<f32>> {
    let ratio = TARGET_SAMPLE_RATE as f64 / src_rate as f64;
    let in_block_frames = 2048;

    let mut resampler = SincFixedIn::<f32>::new(
        ratio,
        2.0,
        rubato::SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: rubato::SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        },
        in_block_frames,
        1, // mono
    )
    .map_err(|e| anyhow!(e))
    .context("failed to init resampler")?;

    let expected_out = (mono_src.len() as f64 * ratio).round() as usize;
    let in_max = resampler.input_frames_max();

    let mut padded = mono_src.to_vec();
    let rem = padded.len() % in_max;
    if rem != 0 {
        padded.resize(padded.len() + (in_max - rem), 0.0);
    }

    let mut out = Vec::with_capacity(expected_out);
    for block in padded.chunks(in_max) {
        let input = vec![block.to_vec()];
        let processed = resampler
            .process(&input, None)
            .map_err(|e| anyhow!(e))
            .context("resampler process failed")?;

        if processed.len() != 1 {
            bail!("expected mono output from resampler");
        }
        out.extend_from_slice(&processed[0]);
    }

    out.truncate(expected_out);
    Ok(out)
}

//! Resolve output paths and write a transcript to disk in each requested format.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::{Error, Result};
use crate::json_encoder::JsonEncoder;
use crate::output_format::OutputFormat;
use crate::srt_encoder::SrtEncoder;
use crate::transcript::Transcript;
use crate::transcript_encoder::TranscriptEncoder;
use crate::tsv_encoder::TsvEncoder;
use crate::txt_encoder::TxtEncoder;
use crate::vtt_encoder::VttEncoder;

/// Where and how transcripts are written.
///
/// `formats` must be non-empty and deduplicated by the caller; every format in
/// the set produces exactly one file per input.
#[derive(Debug, Clone)]
pub struct OutputOpts {
    pub formats: Vec<OutputFormat>,
    pub dir: PathBuf,
}

/// The output filename stem for an input path: the file name with its
/// extension stripped.
pub fn base_filename(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "transcript".to_owned())
}

/// Write `transcript` once per requested format, overwriting existing files.
///
/// The output directory is created before the first write. Returns the paths
/// written, in format order.
pub fn write_transcript(
    transcript: &Transcript,
    input: &Path,
    opts: &OutputOpts,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&opts.dir).map_err(|err| {
        Error::output(
            &opts.dir,
            &anyhow::Error::from(err).context("failed to create output directory"),
        )
    })?;

    let stem = base_filename(input);
    let mut written = Vec::with_capacity(opts.formats.len());

    for format in &opts.formats {
        let path = opts.dir.join(format!("{stem}.{}", format.extension()));
        write_one(transcript, *format, &path).map_err(|err| Error::output(&path, &err))?;
        written.push(path);
    }

    Ok(written)
}

fn write_one(
    transcript: &Transcript,
    format: OutputFormat,
    path: &Path,
) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create '{}'", path.display()))?;
    let writer = BufWriter::new(file);

    // Select an encoder based on the requested output format.
    // We keep this explicit (no trait objects escaping) to avoid lifetime surprises.
    match format {
        OutputFormat::Txt => {
            let mut encoder = TxtEncoder::new(writer);
            merge_encode_and_close(encoder.encode(transcript), encoder.close())
        }
        OutputFormat::Srt => {
            let mut encoder = SrtEncoder::new(writer);
            merge_encode_and_close(encoder.encode(transcript), encoder.close())
        }
        OutputFormat::Vtt => {
            let mut encoder = VttEncoder::new(writer);
            merge_encode_and_close(encoder.encode(transcript), encoder.close())
        }
        OutputFormat::Tsv => {
            let mut encoder = TsvEncoder::new(writer);
            merge_encode_and_close(encoder.encode(transcript), encoder.close())
        }
        OutputFormat::Json => {
            let mut encoder = JsonEncoder::new(writer);
            merge_encode_and_close(encoder.encode(transcript), encoder.close())
        }
    }
}

fn merge_encode_and_close(
    encode_res: anyhow::Result<()>,
    close_res: anyhow::Result<()>,
) -> anyhow::Result<()> {
    match (encode_res, close_res) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(close_err)) => Err(close_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close_err)) => Err(err.context(close_err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Segment;

    fn transcript() -> Transcript {
        Transcript::from_segments(vec![Segment {
            start_seconds: 0.0,
            end_seconds: 1.0,
            text: " hello".to_string(),
            words: None,
        }])
    }

    #[test]
    fn base_filename_strips_directory_and_extension() {
        assert_eq!(base_filename(Path::new("/tmp/audio/talk.mp3")), "talk");
        assert_eq!(base_filename(Path::new("episode.final.wav")), "episode.final");
        assert_eq!(base_filename(Path::new("noext")), "noext");
    }

    #[test]
    fn writes_one_file_per_format_and_creates_the_directory() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let out_dir = dir.path().join("nested").join("out");
        let opts = OutputOpts {
            formats: vec![OutputFormat::Txt, OutputFormat::Json],
            dir: out_dir.clone(),
        };

        let written = write_transcript(&transcript(), Path::new("talk.mp3"), &opts)?;

        assert_eq!(
            written,
            vec![out_dir.join("talk.txt"), out_dir.join("talk.json")]
        );
        assert_eq!(std::fs::read_to_string(out_dir.join("talk.txt"))?, "hello\n");
        assert!(out_dir.join("talk.json").exists());
        Ok(())
    }

    #[test]
    fn overwrites_existing_output_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let opts = OutputOpts {
            formats: vec![OutputFormat::Txt],
            dir: dir.path().to_path_buf(),
        };
        let stale = dir.path().join("talk.txt");
        std::fs::write(&stale, "stale contents")?;

        write_transcript(&transcript(), Path::new("talk.mp3"), &opts)?;
        assert_eq!(std::fs::read_to_string(&stale)?, "hello\n");
        Ok(())
    }

    #[test]
    fn uncreatable_output_dir_is_an_output_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        // A file where the directory should go makes create_dir_all fail.
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "file, not dir")?;

        let opts = OutputOpts {
            formats: vec![OutputFormat::Txt],
            dir: blocker,
        };
        let err = write_transcript(&transcript(), Path::new("talk.mp3"), &opts).unwrap_err();
        assert!(matches!(err, Error::Output { .. }));
        Ok(())
    }
}

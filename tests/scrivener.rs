use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use scrivener::engine::Engine;
use scrivener::error::{Error, Result};
use scrivener::opts::TranscribeOpts;
use scrivener::output::OutputOpts;
use scrivener::output_format::OutputFormat;
use scrivener::scrivener::Scrivener;
use scrivener::transcript::{Segment, Transcript, Word};

/// Test engine that returns a canned transcript, failing for chosen paths.
struct FixedEngine {
    fail_for: Vec<PathBuf>,
}

impl FixedEngine {
    fn new() -> Self {
        Self { fail_for: Vec::new() }
    }

    fn failing_for(path: impl Into<PathBuf>) -> Self {
        Self {
            fail_for: vec![path.into()],
        }
    }

    fn canned_transcript(word_timestamps: bool) -> Transcript {
        let words = word_timestamps.then(|| {
            vec![
                Word {
                    word: "treat".to_string(),
                    start_seconds: 0.0,
                    end_seconds: 0.5,
                },
                Word {
                    word: "yourself".to_string(),
                    start_seconds: 0.5,
                    end_seconds: 1.25,
                },
            ]
        });

        Transcript::from_segments(vec![Segment {
            start_seconds: 0.0,
            end_seconds: 1.25,
            text: " treat yourself".to_string(),
            words,
        }])
    }
}

impl Engine for FixedEngine {
    fn transcribe(&mut self, audio_path: &Path, opts: &TranscribeOpts) -> Result<Transcript> {
        if self.fail_for.iter().any(|p| p == audio_path) {
            return Err(Error::Transcription {
                path: audio_path.to_path_buf(),
                reason: "simulated decode failure".to_string(),
            });
        }

        Ok(Self::canned_transcript(opts.word_timestamps))
    }
}

fn touch(path: &Path) {
    std::fs::write(path, b"fake audio bytes").expect("create input fixture");
}

fn dir_entries(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .expect("read output dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn writes_one_file_per_input_and_format() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let a = dir.path().join("a.mp3");
    let b = dir.path().join("b.mp3");
    touch(&a);
    touch(&b);

    let out_dir = dir.path().join("out");
    let output = OutputOpts {
        formats: vec![OutputFormat::Txt, OutputFormat::Json],
        dir: out_dir.clone(),
    };

    let mut scrivener = Scrivener::with_engine(FixedEngine::new());
    let summary = scrivener.run(
        &[a.clone(), b.clone()],
        &TranscribeOpts::default(),
        &output,
    )?;

    assert_eq!(summary.exit_code(), 0);
    assert_eq!(summary.succeeded, vec![a, b]);
    assert!(summary.failed.is_empty());

    let expected: BTreeSet<String> = ["a.txt", "a.json", "b.txt", "b.json"]
        .into_iter()
        .map(str::to_owned)
        .collect();
    assert_eq!(dir_entries(&out_dir), expected);
    Ok(())
}

#[test]
fn missing_input_is_skipped_and_the_batch_continues() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("missing.mp3");
    let b = dir.path().join("b.mp3");
    touch(&b);

    let out_dir = dir.path().join("out");
    let output = OutputOpts {
        formats: vec![OutputFormat::Txt],
        dir: out_dir.clone(),
    };

    let mut scrivener = Scrivener::with_engine(FixedEngine::new());
    let summary = scrivener.run(
        &[missing.clone(), b.clone()],
        &TranscribeOpts::default(),
        &output,
    )?;

    assert_eq!(summary.exit_code(), 2);
    assert_eq!(summary.succeeded, vec![b]);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, missing);
    assert!(matches!(summary.failed[0].1, Error::Input { .. }));

    // Nothing written for the missing input, everything for the good one.
    let expected: BTreeSet<String> = [String::from("b.txt")].into_iter().collect();
    assert_eq!(dir_entries(&out_dir), expected);
    Ok(())
}

#[test]
fn engine_failure_is_recorded_per_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let a = dir.path().join("a.mp3");
    let b = dir.path().join("b.mp3");
    touch(&a);
    touch(&b);

    let out_dir = dir.path().join("out");
    let output = OutputOpts {
        formats: vec![OutputFormat::Txt],
        dir: out_dir.clone(),
    };

    let mut scrivener = Scrivener::with_engine(FixedEngine::failing_for(&a));
    let summary = scrivener.run(
        &[a.clone(), b.clone()],
        &TranscribeOpts::default(),
        &output,
    )?;

    assert_eq!(summary.exit_code(), 2);
    assert_eq!(summary.succeeded, vec![b]);
    assert!(matches!(summary.failed[0].1, Error::Transcription { .. }));
    assert!(!out_dir.join("a.txt").exists());
    assert!(out_dir.join("b.txt").exists());
    Ok(())
}

#[test]
fn empty_inputs_are_a_usage_error() {
    let mut scrivener = Scrivener::with_engine(FixedEngine::new());
    let output = OutputOpts {
        formats: vec![OutputFormat::Txt],
        dir: PathBuf::from("."),
    };

    let err = scrivener
        .run(&[], &TranscribeOpts::default(), &output)
        .unwrap_err();
    assert!(matches!(err, Error::Usage(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn empty_format_set_is_a_usage_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let a = dir.path().join("a.mp3");
    touch(&a);

    let mut scrivener = Scrivener::with_engine(FixedEngine::new());
    let output = OutputOpts {
        formats: Vec::new(),
        dir: dir.path().to_path_buf(),
    };

    let err = scrivener
        .run(&[a], &TranscribeOpts::default(), &output)
        .unwrap_err();
    assert!(matches!(err, Error::Usage(_)));
    Ok(())
}

#[test]
fn json_output_round_trips_from_disk() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let a = dir.path().join("a.mp3");
    touch(&a);

    let output = OutputOpts {
        formats: vec![OutputFormat::Json],
        dir: dir.path().join("out"),
    };
    let opts = TranscribeOpts {
        word_timestamps: true,
        ..TranscribeOpts::default()
    };

    let mut scrivener = Scrivener::with_engine(FixedEngine::new());
    let summary = scrivener.run(&[a], &opts, &output)?;
    assert_eq!(summary.exit_code(), 0);

    let json = std::fs::read_to_string(output.dir.join("a.json"))?;
    let parsed: Transcript = serde_json::from_str(&json)?;
    assert_eq!(parsed, FixedEngine::canned_transcript(true));
    Ok(())
}

#[test]
fn existing_outputs_are_overwritten() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let a = dir.path().join("a.mp3");
    touch(&a);

    let out_dir = dir.path().join("out");
    std::fs::create_dir_all(&out_dir)?;
    let stale = out_dir.join("a.txt");
    std::fs::write(&stale, "stale transcript")?;

    let output = OutputOpts {
        formats: vec![OutputFormat::Txt],
        dir: out_dir,
    };

    let mut scrivener = Scrivener::with_engine(FixedEngine::new());
    scrivener.run(&[a], &TranscribeOpts::default(), &output)?;

    assert_eq!(std::fs::read_to_string(&stale)?, "treat yourself\n");
    Ok(())
}

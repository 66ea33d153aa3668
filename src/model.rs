//! Resolve a user-facing model name into a ggml model file on disk.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The documented baseline model variant.
pub const DEFAULT_MODEL: &str = "large-v3";

/// Default directory where ggml models live (shared with `model-downloader`).
pub const DEFAULT_MODEL_DIR: &str = "./models";

/// Resolve `model` into the path of a ggml model file.
///
/// Accepted spellings:
/// - a path to an existing file (anything containing a path separator, or a
///   bare filename that exists) is used verbatim
/// - a variant name (e.g. `tiny`, `base.en`, `large-v3`) maps to
///   `ggml-{name}.bin` inside `model_dir`
///
/// A resolved-but-missing file is an [`Error::EngineLoad`]: the model weights
/// are a hard prerequisite and the message points at `model-downloader`.
pub fn resolve_model_path(model: &str, model_dir: &Path) -> Result<PathBuf> {
    let as_path = Path::new(model);
    if model.contains(std::path::MAIN_SEPARATOR) || as_path.is_file() {
        if as_path.is_file() {
            return Ok(as_path.to_path_buf());
        }
        return Err(Error::EngineLoad {
            model: model.to_string(),
            reason: format!("model file '{}' does not exist", as_path.display()),
        });
    }

    let candidate = model_dir.join(variant_filename(model));
    if candidate.is_file() {
        return Ok(candidate);
    }

    Err(Error::EngineLoad {
        model: model.to_string(),
        reason: format!(
            "'{}' not found; fetch it with `model-downloader --name {model}`",
            candidate.display()
        ),
    })
}

/// The ggml filename convention for a variant name.
fn variant_filename(name: &str) -> String {
    format!("ggml-{name}.bin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_names_map_to_ggml_filenames() {
        assert_eq!(variant_filename("tiny"), "ggml-tiny.bin");
        assert_eq!(variant_filename("base.en"), "ggml-base.en.bin");
        assert_eq!(variant_filename("large-v3"), "ggml-large-v3.bin");
    }

    #[test]
    fn resolves_variant_inside_model_dir() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let model_file = dir.path().join("ggml-tiny.bin");
        std::fs::write(&model_file, b"stub weights")?;

        let resolved = resolve_model_path("tiny", dir.path())?;
        assert_eq!(resolved, model_file);
        Ok(())
    }

    #[test]
    fn explicit_file_path_is_used_verbatim() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let model_file = dir.path().join("custom.bin");
        std::fs::write(&model_file, b"stub weights")?;

        let spelled = model_file.to_string_lossy().to_string();
        let resolved = resolve_model_path(&spelled, Path::new("./models"))?;
        assert_eq!(resolved, model_file);
        Ok(())
    }

    #[test]
    fn missing_variant_reports_engine_load_with_downloader_hint() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let err = resolve_model_path("tiny", dir.path()).unwrap_err();
        match &err {
            Error::EngineLoad { model, reason } => {
                assert_eq!(model, "tiny");
                assert!(reason.contains("model-downloader"));
            }
            other => panic!("expected EngineLoad, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn missing_explicit_path_reports_engine_load() {
        let err =
            resolve_model_path("/no/such/dir/ggml-tiny.bin", Path::new("./models")).unwrap_err();
        assert!(matches!(err, Error::EngineLoad { .. }));
    }
}

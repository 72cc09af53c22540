//! Speech-to-text (STT) processing
//!
//! Offline recognition with a local Whisper model. The model is loaded once
//! and held by the transcriber for the life of the session.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use super::capture::{AudioCapture, peak_energy};
use crate::session::Transcriber;
use crate::{Error, Result};

/// Recordings quieter than this are treated as silence and not transcribed
const SILENCE_THRESHOLD: f32 = 0.02;

/// Non-speech annotations such as `[BLANK_AUDIO]` or `(música)`
static MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]|\([^)]*\)").expect("valid regex"));

/// Records from the microphone and transcribes with Whisper
pub struct LocalTranscriber {
    context: Arc<WhisperContext>,
    capture: AudioCapture,
    language: String,
}

impl LocalTranscriber {
    /// Load the model and open the microphone
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelNotFound`] if no model exists at `model_path`,
    /// or an error if the model or audio device cannot be opened
    pub fn new(model_path: &Path, language: &str) -> Result<Self> {
        let model = resolve_model_file(model_path)?;
        let model_str = model
            .to_str()
            .ok_or_else(|| Error::Config(format!("non-UTF-8 model path: {}", model.display())))?;

        tracing::info!(model = %model.display(), "loading speech model");
        let context =
            WhisperContext::new_with_params(model_str, WhisperContextParameters::default())
                .map_err(|e| Error::Stt(format!("failed to load {}: {e}", model.display())))?;

        let capture = AudioCapture::new()?;

        Ok(Self {
            context: Arc::new(context),
            capture,
            language: whisper_language(language),
        })
    }
}

#[async_trait(?Send)]
impl Transcriber for LocalTranscriber {
    async fn transcribe(&mut self, max_seconds: u32) -> Result<String> {
        let samples = self
            .capture
            .record(Duration::from_secs(u64::from(max_seconds)))
            .await?;

        let energy = peak_energy(&samples);
        if energy < SILENCE_THRESHOLD {
            tracing::trace!(energy, "silence, skipping recognition");
            return Ok(String::new());
        }

        let context = Arc::clone(&self.context);
        let language = self.language.clone();
        let raw = tokio::task::spawn_blocking(move || infer(&context, &samples, &language))
            .await
            .map_err(|e| Error::Stt(format!("recognition task failed: {e}")))??;

        let text = clean_transcript(&raw);
        tracing::debug!(raw = %raw, text = %text, "transcription complete");
        Ok(text)
    }
}

/// Find the model file for a configured path
///
/// A file is used as-is. A directory is searched for the first `*.bin` file
/// in name order.
///
/// # Errors
///
/// Returns [`Error::ModelNotFound`] if neither applies
pub fn resolve_model_file(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    if path.is_dir() {
        let mut candidates: Vec<PathBuf> = std::fs::read_dir(path)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("bin"))
            })
            .collect();
        candidates.sort();

        if let Some(model) = candidates.into_iter().next() {
            return Ok(model);
        }
    }

    Err(Error::ModelNotFound(path.display().to_string()))
}

/// Normalize raw recognizer output: drop annotations, collapse whitespace,
/// lower-case
#[must_use]
pub fn clean_transcript(raw: &str) -> String {
    MARKER_REGEX
        .replace_all(raw, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whisper takes bare language codes ("es", not "es-419")
fn whisper_language(language: &str) -> String {
    language
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

fn infer(context: &WhisperContext, samples: &[f32], language: &str) -> Result<String> {
    let mut state = context
        .create_state()
        .map_err(|e| Error::Stt(e.to_string()))?;

    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
    if !language.is_empty() {
        params.set_language(Some(language));
    }
    params.set_print_progress(false);
    params.set_print_special(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    state
        .full(params, samples)
        .map_err(|e| Error::Stt(e.to_string()))?;

    let segments = state
        .full_n_segments()
        .map_err(|e| Error::Stt(e.to_string()))?;

    let mut text = String::new();
    for i in 0..segments {
        let segment = state
            .full_get_segment_text(i)
            .map_err(|e| Error::Stt(e.to_string()))?;
        text.push_str(&segment);
        text.push(' ');
    }

    Ok(text)
}

//! Text-to-speech (TTS) processing
//!
//! Speaks through a local `espeak-ng` install, falling back to classic
//! `espeak` when only that is available.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::session::Speaker;
use crate::{Error, Result};

/// One entry of the engine's voice listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInfo {
    /// Primary language code, also accepted by `-v`
    pub language: String,
    /// Human-readable voice name
    pub name: String,
    /// Additional language codes the voice covers
    pub other_languages: Vec<String>,
}

impl VoiceInfo {
    fn languages(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.language.as_str()).chain(self.other_languages.iter().map(String::as_str))
    }
}

/// Parse `espeak-ng --voices` output
///
/// Lines look like ` 5  es-419   --/M   Spanish_(Latin_America)  roa/es-419  (es 6)`.
/// The header line and lines with too few columns are skipped.
#[must_use]
pub fn parse_voices(listing: &str) -> Vec<VoiceInfo> {
    listing
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 5 || fields[0] == "Pty" {
                return None;
            }

            let other_languages = fields[5..]
                .iter()
                .map(|token| token.trim_matches(|c| c == '(' || c == ')'))
                .filter(|token| !token.is_empty() && !token.chars().all(|c| c.is_ascii_digit()))
                .map(ToString::to_string)
                .collect();

            Some(VoiceInfo {
                language: fields[1].to_string(),
                name: fields[3].to_string(),
                other_languages,
            })
        })
        .collect()
}

/// First voice whose languages contain `language`, ignoring case
#[must_use]
pub fn select_voice<'a>(voices: &'a [VoiceInfo], language: &str) -> Option<&'a VoiceInfo> {
    let requested = language.trim().to_lowercase();
    if requested.is_empty() {
        return None;
    }

    voices.iter().find(|voice| {
        voice
            .languages()
            .any(|lang| lang.to_lowercase().contains(&requested))
    })
}

/// Speaks text with a local espeak engine
pub struct EspeakSpeaker {
    binary: PathBuf,
    rate: u32,
    voice: Option<String>,
}

impl EspeakSpeaker {
    /// Locate the engine and pick a voice for `language`
    ///
    /// Keeps the engine's default voice when none matches.
    ///
    /// # Errors
    ///
    /// Returns error if no espeak binary is installed
    pub async fn new(rate: u32, language: &str) -> Result<Self> {
        let binary = which::which("espeak-ng")
            .or_else(|_| which::which("espeak"))
            .map_err(|_| {
                Error::Tts("espeak-ng not found in PATH; install it for speech output".to_string())
            })?;

        let output = Command::new(&binary).arg("--voices").output().await?;
        let voices = if output.status.success() {
            parse_voices(&String::from_utf8_lossy(&output.stdout))
        } else {
            tracing::warn!(status = %output.status, "could not list voices");
            Vec::new()
        };
        tracing::debug!(count = voices.len(), "voices available");

        let voice = select_voice(&voices, language).map(|v| {
            tracing::info!(voice = %v.name, code = %v.language, "selected voice");
            v.language.clone()
        });
        if voice.is_none() {
            tracing::info!(language, "no matching voice, using engine default");
        }

        Ok(Self {
            binary,
            rate,
            voice,
        })
    }

    /// Selected voice code, if any
    #[must_use]
    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    /// Engine arguments for speaking `text`; `--` keeps the text from being
    /// read as an option
    fn speak_args(&self, text: &str) -> Vec<String> {
        let mut args = vec!["-s".to_string(), self.rate.to_string()];
        if let Some(voice) = &self.voice {
            args.extend(["-v".to_string(), voice.clone()]);
        }
        args.extend(["--".to_string(), text.to_string()]);
        args
    }
}

#[async_trait(?Send)]
impl Speaker for EspeakSpeaker {
    async fn speak(&mut self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }

        tracing::debug!(text, "speaking");

        let status = Command::new(&self.binary)
            .args(self.speak_args(text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .await?;

        if !status.success() {
            return Err(Error::Tts(format!(
                "{} exited with {status}",
                self.binary.display()
            )));
        }

        Ok(())
    }
}

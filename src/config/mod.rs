//! Configuration management for the Lía assistant
//!
//! Values resolve as environment > TOML file > default. A `.env` file in the
//! working directory is loaded into the environment first.

pub mod apps;
pub mod file;

use std::path::PathBuf;

use crate::skills::DEFAULT_RATES_URL;

pub use apps::{YamlAppRegistry, load_registry, parse_registry};

/// Recording limit used when none is configured
pub const DEFAULT_MAX_RECORD_SECONDS: u32 = 5;

/// Assistant configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whisper model file, or a directory containing one
    pub model_path: PathBuf,

    /// Exchange rates endpoint
    pub rates_url: String,

    /// Maximum length of one recorded utterance
    pub max_record_seconds: u32,

    /// Application registry YAML file
    pub apps_file: PathBuf,

    /// Speech output settings
    pub voice: VoiceConfig,
}

/// Speech output configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceConfig {
    /// Speaking rate in words per minute
    pub speech_rate: u32,

    /// Language code used to pick a voice and to guide recognition
    pub language: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            speech_rate: 145,
            language: "es".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model"),
            rates_url: DEFAULT_RATES_URL.to_string(),
            max_record_seconds: DEFAULT_MAX_RECORD_SECONDS,
            apps_file: PathBuf::from("apps.yml"),
            voice: VoiceConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `.env`, the process environment and the
    /// optional TOML file
    #[must_use]
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "failed to load .env"),
        }

        let fc = file::load_config_file();
        Self::from_sources(|key| std::env::var(key).ok(), fc)
    }

    /// Resolve configuration from an environment lookup and a parsed file
    ///
    /// Empty environment values count as unset. Numeric values that do not
    /// parse as positive integers fall back to the next source.
    #[must_use]
    pub fn from_sources<F>(lookup: F, fc: file::LiaConfigFile) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let model_path = env("LIA_MODEL")
            .or(fc.model_path)
            .map_or(defaults.model_path, PathBuf::from);

        let rates_url = env("LIA_RATES_URL")
            .or(fc.rates_url)
            .unwrap_or(defaults.rates_url);

        let max_record_seconds = env("LIA_MAX_RECORD_SECONDS")
            .and_then(|v| parse_positive(&v))
            .or_else(|| fc.max_record_seconds.filter(|s| *s > 0))
            .unwrap_or(defaults.max_record_seconds);

        let apps_file = env("LIA_APPS_FILE")
            .or(fc.apps_file)
            .map_or(defaults.apps_file, PathBuf::from);

        let voice = VoiceConfig {
            speech_rate: env("LIA_SPEECH_RATE")
                .and_then(|v| parse_positive(&v))
                .or_else(|| fc.voice.speech_rate.filter(|r| *r > 0))
                .unwrap_or(defaults.voice.speech_rate),
            language: env("LIA_VOICE_LANGUAGE")
                .or(fc.voice.language)
                .unwrap_or(defaults.voice.language),
        };

        Self {
            model_path,
            rates_url,
            max_record_seconds,
            apps_file,
            voice,
        }
    }
}

fn parse_positive(value: &str) -> Option<u32> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            tracing::warn!(value, "expected a positive integer, using fallback");
            None
        }
    }
}

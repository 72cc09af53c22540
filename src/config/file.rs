//! TOML configuration file loading
//!
//! Supports `~/.config/lia/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct LiaConfigFile {
    /// Whisper model file or directory
    pub model_path: Option<String>,

    /// Exchange rates endpoint
    pub rates_url: Option<String>,

    /// Maximum seconds per recorded utterance
    pub max_record_seconds: Option<u32>,

    /// Application registry YAML file
    pub apps_file: Option<String>,

    /// Speech output configuration
    #[serde(default)]
    pub voice: VoiceFileConfig,
}

/// Speech output configuration
#[derive(Debug, Default, Deserialize)]
pub struct VoiceFileConfig {
    /// Words per minute
    pub speech_rate: Option<u32>,

    /// Voice language code (e.g. "es")
    pub language: Option<String>,
}

/// Load the TOML config file from the standard path
///
/// Returns `LiaConfigFile::default()` if the file doesn't exist or can't be parsed.
#[must_use]
pub fn load_config_file() -> LiaConfigFile {
    config_file_path().map_or_else(LiaConfigFile::default, |path| load_from(&path))
}

/// Load a TOML config file from `path`, falling back to defaults
#[must_use]
pub fn load_from(path: &Path) -> LiaConfigFile {
    if !path.exists() {
        return LiaConfigFile::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                LiaConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            LiaConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/lia/config.toml`
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("lia").join("config.toml"))
}

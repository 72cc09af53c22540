//! Error types for the Lía assistant

use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the assistant
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Speech recognition model missing at startup
    #[error(
        "speech model not found at {0}. Download a Spanish-capable Whisper ggml model \
         (e.g. 'ggml-small.bin') and set LIA_MODEL to its path"
    )]
    ModelNotFound(String),

    /// Audio error
    #[error("audio error: {0}")]
    Audio(String),

    /// Speech-to-text error
    #[error("STT error: {0}")]
    Stt(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// Application launch error
    #[error("launch error: {0}")]
    Launch(String),

    /// Exchange rate fetch error
    #[error("rates error: {0}")]
    Rates(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

//! Voice processing module
//!
//! Microphone capture, offline speech recognition and local speech output.

mod capture;
mod stt;
mod tts;

pub use capture::{AudioCapture, SAMPLE_RATE, peak_energy};
pub use stt::{LocalTranscriber, clean_transcript, resolve_model_file};
pub use tts::{EspeakSpeaker, VoiceInfo, parse_voices, select_voice};

//! Lía - offline Spanish voice assistant
//!
//! Listens for an utterance, classifies it with an ordered table of regex
//! rules, runs the matching skill and answers aloud:
//! - Local Whisper recognition for speech-to-text
//! - Rule-based intents (greeting, time, date, dollar rate, open app, goodbye)
//! - `espeak-ng` for text-to-speech
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    SessionLoop                        │
//! │   Greeting → Listening → Processing → Responding      │
//! └────────┬──────────────────┬──────────────────┬────────┘
//!          │                  │                  │
//! ┌────────▼───────┐ ┌────────▼───────┐ ┌────────▼───────┐
//! │ Transcriber    │ │ IntentMatcher  │ │ Speaker        │
//! │ (cpal+whisper) │ │ Router→Skills  │ │ (espeak-ng)    │
//! └────────────────┘ └────────┬───────┘ └────────────────┘
//!                             │
//!            ┌────────────────┼────────────────┐
//!       AppRegistry      RateFetcher       Launcher
//!       (apps.yml)       (HTTP JSON)       (shell)
//! ```

pub mod config;
pub mod error;
pub mod intent;
pub mod router;
pub mod session;
pub mod skills;
pub mod voice;

pub use config::Config;
pub use error::{Error, Result};
pub use intent::{Intent, IntentMatcher, RecognizedIntent};
pub use router::{Router, SkillOutcome};
pub use session::{SessionLoop, SessionState, Speaker, Transcriber};
pub use skills::{AppRegistry, Launcher, RateFetcher, SkillSet};

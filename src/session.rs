//! Interactive session loop
//!
//! Drives one turn at a time: listen, classify, route, respond. Every stage
//! finishes before the next begins and nothing interrupts a recording.
//!
//! ```text
//! Greeting ──► Listening ──► Processing ──► Responding ──► Listening
//!                  ▲  │                          │
//!                  └──┘ (empty / error)          └──► Terminated (goodbye)
//! ```

use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;

use crate::Result;
use crate::intent::{Intent, IntentMatcher};
use crate::router::{Router, SkillOutcome};

/// Announced once when the session starts
pub const STARTUP_MESSAGE: &str = "Hola, soy tu asistente. Estoy escuchando...";

/// Pause after a failed recording before listening again
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Records an utterance and turns it into text
#[async_trait(?Send)]
pub trait Transcriber {
    /// Listen for at most `max_seconds` and return lower-cased text
    ///
    /// Returns an empty string when nothing was recognized.
    ///
    /// # Errors
    ///
    /// Returns error if recording or recognition fails
    async fn transcribe(&mut self, max_seconds: u32) -> Result<String>;
}

/// Speaks text aloud
#[async_trait(?Send)]
pub trait Speaker {
    /// Speak `text`, returning once playback has finished
    ///
    /// # Errors
    ///
    /// Returns error if synthesis or playback fails
    async fn speak(&mut self, text: &str) -> Result<()>;
}

/// Where the session is in its turn cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Startup announcement pending
    Greeting,
    /// Waiting for an utterance
    Listening,
    /// Utterance received, not yet classified
    Processing(String),
    /// Reply ready to deliver
    Responding {
        /// Intent that produced the reply
        intent: Intent,
        /// Reply to deliver
        outcome: SkillOutcome,
    },
    /// Session over
    Terminated,
}

/// Turn-based assistant session
///
/// Owns the recognition and speech handles for its whole lifetime. Printed
/// output goes to `console`.
pub struct SessionLoop<T, S, W> {
    matcher: IntentMatcher,
    router: Router,
    transcriber: T,
    speaker: S,
    console: W,
    max_record_seconds: u32,
    state: SessionState,
}

impl<T: Transcriber, S: Speaker, W: Write> SessionLoop<T, S, W> {
    /// Create a session in the [`SessionState::Greeting`] state
    #[must_use]
    pub const fn new(
        router: Router,
        transcriber: T,
        speaker: S,
        console: W,
        max_record_seconds: u32,
    ) -> Self {
        Self {
            matcher: IntentMatcher::new(),
            router,
            transcriber,
            speaker,
            console,
            max_record_seconds,
            state: SessionState::Greeting,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether the session has ended
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        matches!(self.state, SessionState::Terminated)
    }

    /// Run turns until the user says goodbye
    ///
    /// # Errors
    ///
    /// Returns error only if the console cannot be written
    pub async fn run(&mut self) -> Result<()> {
        while !self.is_terminated() {
            self.step().await?;
        }
        tracing::info!("session ended");
        Ok(())
    }

    /// Perform one state transition
    ///
    /// # Errors
    ///
    /// Returns error only if the console cannot be written
    pub async fn step(&mut self) -> Result<()> {
        let state = std::mem::replace(&mut self.state, SessionState::Terminated);

        self.state = match state {
            SessionState::Greeting => {
                self.deliver(&SkillOutcome::spoken(STARTUP_MESSAGE)).await?;
                SessionState::Listening
            }
            SessionState::Listening => self.listen().await?,
            SessionState::Processing(text) => {
                let recognized = self.matcher.classify(&text);
                let outcome = self.router.route(&recognized).await;
                SessionState::Responding {
                    intent: recognized.intent,
                    outcome,
                }
            }
            SessionState::Responding { intent, outcome } => {
                self.deliver(&outcome).await?;
                if intent == Intent::Goodbye {
                    SessionState::Terminated
                } else {
                    SessionState::Listening
                }
            }
            SessionState::Terminated => SessionState::Terminated,
        };

        Ok(())
    }

    /// Consume the session, returning its collaborators
    #[must_use]
    pub fn into_parts(self) -> (T, S, W) {
        (self.transcriber, self.speaker, self.console)
    }

    async fn listen(&mut self) -> Result<SessionState> {
        match self.transcriber.transcribe(self.max_record_seconds).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    tracing::trace!("nothing heard");
                    return Ok(SessionState::Listening);
                }
                tracing::info!(text, "heard");
                Ok(SessionState::Processing(text.to_string()))
            }
            Err(e) => {
                tracing::warn!(error = %e, "transcription failed");
                writeln!(self.console, "Error al grabar o transcribir: {e}")?;
                tokio::time::sleep(RETRY_DELAY).await;
                Ok(SessionState::Listening)
            }
        }
    }

    /// Speak or print a reply, printing if speech fails
    async fn deliver(&mut self, outcome: &SkillOutcome) -> Result<()> {
        if outcome.message.is_empty() {
            return Ok(());
        }

        if outcome.should_speak {
            match self.speaker.speak(&outcome.message).await {
                Ok(()) => return Ok(()),
                Err(e) => tracing::warn!(error = %e, "speech failed, printing instead"),
            }
        }

        writeln!(self.console, "{}", outcome.message)?;
        Ok(())
    }
}

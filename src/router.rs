//! Intent routing
//!
//! Turns a classified utterance into a reply and a speak/print decision.

use crate::intent::{Intent, RecognizedIntent};
use crate::skills::{self, SkillSet};

/// Reply for text no rule matched
pub const UNRECOGNIZED_REPLY: &str = "No entendí tu pedido.";

/// Reply for one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillOutcome {
    /// Speak the message aloud instead of printing it
    pub should_speak: bool,
    /// Text to deliver
    pub message: String,
}

impl SkillOutcome {
    /// An outcome delivered through speech
    #[must_use]
    pub fn spoken(message: impl Into<String>) -> Self {
        Self {
            should_speak: true,
            message: message.into(),
        }
    }
}

/// Dispatches intents to skills
pub struct Router {
    skills: SkillSet,
}

impl Router {
    /// Create a router over a skill set
    #[must_use]
    pub const fn new(skills: SkillSet) -> Self {
        Self { skills }
    }

    /// Run the skill for `recognized` and wrap its reply
    ///
    /// Every intent is currently spoken, including failed launches.
    pub async fn route(&self, recognized: &RecognizedIntent) -> SkillOutcome {
        tracing::debug!(intent = %recognized.intent, "routing");

        match recognized.intent {
            Intent::Greeting => SkillOutcome::spoken(skills::greeting()),
            Intent::Time => SkillOutcome::spoken(skills::current_time()),
            Intent::Date => SkillOutcome::spoken(skills::current_date()),
            Intent::CurrencyRate => {
                let which = recognized.param("which").filter(|w| !w.is_empty());
                SkillOutcome::spoken(self.skills.currency_rate(which).await)
            }
            Intent::OpenApp => {
                let name = recognized.param("name").unwrap_or_default();
                let (_launched, message) = self.skills.open_app(name);
                SkillOutcome::spoken(message)
            }
            Intent::Goodbye => SkillOutcome::spoken(skills::goodbye()),
            Intent::Unrecognized => SkillOutcome::spoken(UNRECOGNIZED_REPLY),
        }
    }
}

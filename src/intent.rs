//! Intent classification
//!
//! Maps recognized Spanish text to an [`Intent`] plus named captures using an
//! ordered table of regex rules. The first rule that matches anywhere in the
//! text wins, so more specific rules must be declared first.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Salutation
    Greeting,
    /// Current time
    Time,
    /// Current date
    Date,
    /// Dollar exchange rate, optionally a single rate kind
    CurrencyRate,
    /// Launch a configured application
    OpenApp,
    /// End the session
    Goodbye,
    /// No rule matched
    Unrecognized,
}

impl Intent {
    /// Stable identifier used in logs and diagnostics
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Time => "time",
            Self::Date => "date",
            Self::CurrencyRate => "currency_rate",
            Self::OpenApp => "open_app",
            Self::Goodbye => "goodbye",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result for one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedIntent {
    /// Matched intent
    pub intent: Intent,
    /// Named captures, lower-cased. Groups that did not participate are absent
    pub parameters: HashMap<String, String>,
}

impl RecognizedIntent {
    /// The sentinel for text no rule matched
    #[must_use]
    pub fn unrecognized() -> Self {
        Self {
            intent: Intent::Unrecognized,
            parameters: HashMap::new(),
        }
    }

    /// Look up a captured parameter
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }
}

/// A compiled rule: an intent and the pattern that triggers it
struct IntentRule {
    intent: Intent,
    pattern: Regex,
}

impl IntentRule {
    fn new(intent: Intent, pattern: &str) -> Self {
        Self {
            intent,
            pattern: Regex::new(&format!("(?i){pattern}")).expect("valid regex"),
        }
    }
}

/// Declaration order is match priority
static RULES: LazyLock<Vec<IntentRule>> = LazyLock::new(|| {
    vec![
        IntentRule::new(
            Intent::Greeting,
            r"\b(hola|buen(?:os|as)?\s*(?:d[ií]as?|tardes?|noches?))\b",
        ),
        IntentRule::new(Intent::Time, r"\b(qu[ée]\s*hora|hora)\b"),
        IntentRule::new(Intent::Date, r"\b(qu[ée]\s*d[ií]a|fecha)\b"),
        IntentRule::new(
            Intent::CurrencyRate,
            r"\bd[oó]lar\s*(?P<which>oficial|blue)?\b",
        ),
        IntentRule::new(Intent::OpenApp, r"\babr(?:ir|e|í)\s+(?P<name>\w+)\b"),
        IntentRule::new(Intent::Goodbye, r"\b(chau|ad[ií][oó]s|hasta\s+luego)\b"),
    ]
});

/// Rule-based intent classifier
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentMatcher;

impl IntentMatcher {
    /// Create a matcher over the built-in rule table
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Classify an utterance
    ///
    /// Matching is case-insensitive and unanchored. Returns
    /// [`RecognizedIntent::unrecognized`] when no rule matches.
    #[must_use]
    pub fn classify(&self, text: &str) -> RecognizedIntent {
        for rule in RULES.iter() {
            let Some(caps) = rule.pattern.captures(text) else {
                continue;
            };

            let parameters = rule
                .pattern
                .capture_names()
                .flatten()
                .filter_map(|name| {
                    caps.name(name)
                        .map(|m| (name.to_string(), m.as_str().to_lowercase()))
                })
                .collect();

            tracing::debug!(intent = %rule.intent, ?parameters, "intent matched");
            return RecognizedIntent {
                intent: rule.intent,
                parameters,
            };
        }

        tracing::debug!(text, "no intent matched");
        RecognizedIntent::unrecognized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> RecognizedIntent {
        IntentMatcher::new().classify(text)
    }

    #[test]
    fn test_greeting_variants() {
        for text in ["hola", "buen día", "buenos dias", "buenas tardes", "Buenas Noches Lía"] {
            assert_eq!(classify(text).intent, Intent::Greeting, "{text}");
        }
    }

    #[test]
    fn test_time_and_date() {
        assert_eq!(classify("qué hora es").intent, Intent::Time);
        assert_eq!(classify("decime la hora").intent, Intent::Time);
        assert_eq!(classify("qué día es hoy").intent, Intent::Date);
        assert_eq!(classify("la fecha por favor").intent, Intent::Date);
    }

    #[test]
    fn test_currency_with_and_without_kind() {
        let result = classify("cuánto está el dólar blue");
        assert_eq!(result.intent, Intent::CurrencyRate);
        assert_eq!(result.param("which"), Some("blue"));

        let result = classify("precio del DOLAR OFICIAL");
        assert_eq!(result.param("which"), Some("oficial"));

        let result = classify("cómo está el dolar");
        assert_eq!(result.intent, Intent::CurrencyRate);
        assert!(result.parameters.is_empty());
    }

    #[test]
    fn test_open_app_captures_lowercased_name() {
        let result = classify("Abrir Firefox");
        assert_eq!(result.intent, Intent::OpenApp);
        assert_eq!(result.param("name"), Some("firefox"));

        let result = classify("abre el");
        assert_eq!(result.param("name"), Some("el"));

        let result = classify("abrí navegador");
        assert_eq!(result.param("name"), Some("navegador"));
    }

    #[test]
    fn test_open_app_requires_a_token() {
        assert_eq!(classify("abrir").intent, Intent::Unrecognized);
    }

    #[test]
    fn test_goodbye_variants() {
        for text in ["chau", "adiós", "adios", "bueno, hasta luego"] {
            assert_eq!(classify(text).intent, Intent::Goodbye, "{text}");
        }
    }

    #[test]
    fn test_first_declared_rule_wins() {
        assert_eq!(classify("hola y chau").intent, Intent::Greeting);
        assert_eq!(classify("chau, hola").intent, Intent::Greeting);
        assert_eq!(classify("qué hora y qué fecha").intent, Intent::Time);
    }

    #[test]
    fn test_unanchored_match() {
        assert_eq!(classify("che lía, hola").intent, Intent::Greeting);
    }

    #[test]
    fn test_word_boundaries() {
        assert_eq!(classify("horario").intent, Intent::Unrecognized);
        assert_eq!(classify("chaucha").intent, Intent::Unrecognized);
    }

    #[test]
    fn test_blank_input_is_unrecognized() {
        assert_eq!(classify(""), RecognizedIntent::unrecognized());
        assert_eq!(classify("   "), RecognizedIntent::unrecognized());
        assert_eq!(classify("llueve mucho").intent, Intent::Unrecognized);
    }

    #[test]
    fn test_intent_names() {
        assert_eq!(Intent::CurrencyRate.to_string(), "currency_rate");
        assert_eq!(Intent::Unrecognized.as_str(), "unrecognized");
    }
}

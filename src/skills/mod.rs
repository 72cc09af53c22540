//! Skills: the action and reply bound to each intent
//!
//! Stateless skills are free functions. Skills that touch the outside world
//! live on [`SkillSet`], which owns the injected collaborators.

pub mod calendar;
mod launcher;
mod rates;

pub use launcher::{Launcher, ShellLauncher};
pub use rates::{
    DEFAULT_RATES_URL, ExchangeRateSnapshot, HttpRateFetcher, RateFetcher, RateKind, RateQuote,
    parse_quotes,
};

use std::collections::HashMap;

/// Maps spoken application names to launch commands
pub trait AppRegistry: Send + Sync {
    /// Launch command for `name`, if configured
    fn lookup(&self, name: &str) -> Option<String>;
}

impl AppRegistry for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Reply to a greeting
#[must_use]
pub fn greeting() -> String {
    "Hola, ¿en qué puedo ayudarte hoy?".to_string()
}

/// Current local time
#[must_use]
pub fn current_time() -> String {
    calendar::format_time(&chrono::Local::now())
}

/// Current local date
#[must_use]
pub fn current_date() -> String {
    calendar::format_date(&chrono::Local::now())
}

/// Reply to a farewell
#[must_use]
pub fn goodbye() -> String {
    "Hasta luego, ¡que tengas un buen día!".to_string()
}

/// Describe one rate kind or all of them
///
/// With no `which`, every quoted kind is listed in [`RateKind::ALL`] order and
/// unquoted kinds are left out, so an empty snapshot yields an empty string.
#[must_use]
pub fn describe_rates(snapshot: &ExchangeRateSnapshot, which: Option<&str>) -> String {
    if let Some(which) = which {
        return match RateKind::from_label(which).and_then(|kind| snapshot.get(kind)) {
            Some(price) => format!("El dólar {which} está a {price:.2} pesos."),
            None => format!("No reconozco la cotización '{which}'."),
        };
    }

    RateKind::ALL
        .into_iter()
        .filter_map(|kind| {
            snapshot
                .get(kind)
                .map(|price| format!("{}: {price:.2} pesos", kind.label()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Skills backed by external collaborators
pub struct SkillSet {
    apps: Box<dyn AppRegistry>,
    rates: Box<dyn RateFetcher>,
    launcher: Box<dyn Launcher>,
}

impl SkillSet {
    /// Create a skill set over the given collaborators
    #[must_use]
    pub fn new(
        apps: Box<dyn AppRegistry>,
        rates: Box<dyn RateFetcher>,
        launcher: Box<dyn Launcher>,
    ) -> Self {
        Self {
            apps,
            rates,
            launcher,
        }
    }

    /// Report the dollar exchange rate
    ///
    /// Fetch failures become an apology rather than an error.
    pub async fn currency_rate(&self, which: Option<&str>) -> String {
        match self.rates.fetch_rates().await {
            Ok(snapshot) => describe_rates(&snapshot, which),
            Err(e) => {
                tracing::warn!(error = %e, "exchange rate fetch failed");
                "No pude obtener la cotización del dólar en este momento.".to_string()
            }
        }
    }

    /// Open a configured application
    ///
    /// Returns whether the launch succeeded together with the reply.
    pub fn open_app(&self, name: &str) -> (bool, String) {
        let Some(command) = self.apps.lookup(name).filter(|c| !c.trim().is_empty()) else {
            tracing::info!(name, "application not configured");
            return (false, format!("No tengo configurado cómo abrir '{name}'."));
        };

        match self.launcher.launch(&command) {
            Ok(()) => (true, format!("Abriendo {name}.")),
            Err(e) => {
                tracing::warn!(name, error = %e, "application launch failed");
                (false, format!("Hubo un problema al intentar abrir {name}."))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(oficial: Option<f64>, blue: Option<f64>) -> ExchangeRateSnapshot {
        let mut snapshot = ExchangeRateSnapshot::new();
        if let Some(price) = oficial {
            snapshot.insert(RateKind::Oficial, price);
        }
        if let Some(price) = blue {
            snapshot.insert(RateKind::Blue, price);
        }
        snapshot
    }

    #[test]
    fn test_describe_all_rates_in_order() {
        let text = describe_rates(&snapshot(Some(1025.5), Some(1210.0)), None);
        assert_eq!(text, "oficial: 1025.50 pesos; blue: 1210.00 pesos");
    }

    #[test]
    fn test_describe_omits_missing_kinds() {
        assert_eq!(
            describe_rates(&snapshot(None, Some(1300.456)), None),
            "blue: 1300.46 pesos"
        );
        assert_eq!(describe_rates(&snapshot(None, None), None), "");
    }

    #[test]
    fn test_describe_single_rate() {
        let text = describe_rates(&snapshot(Some(1025.0), None), Some("oficial"));
        assert_eq!(text, "El dólar oficial está a 1025.00 pesos.");
    }

    #[test]
    fn test_describe_unknown_or_missing_kind() {
        let rates = snapshot(None, Some(1210.0));
        assert_eq!(
            describe_rates(&rates, Some("oficial")),
            "No reconozco la cotización 'oficial'."
        );
        assert_eq!(
            describe_rates(&rates, Some("tarjeta")),
            "No reconozco la cotización 'tarjeta'."
        );
    }

    #[test]
    fn test_fixed_replies() {
        assert_eq!(greeting(), "Hola, ¿en qué puedo ayudarte hoy?");
        assert_eq!(goodbye(), "Hasta luego, ¡que tengas un buen día!");
    }

    #[test]
    fn test_map_registry_lookup() {
        let mut apps = HashMap::new();
        apps.insert("editor".to_string(), "code".to_string());
        assert_eq!(apps.lookup("editor").as_deref(), Some("code"));
        assert_eq!(AppRegistry::lookup(&apps, "navegador"), None);
    }
}

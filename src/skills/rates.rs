//! Dollar exchange rates

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{Error, Result};

/// Public endpoint listing Argentine dollar quotes
pub const DEFAULT_RATES_URL: &str = "https://dolarapi.com/v1/dolares";

/// Requests are not retried; a timeout is an ordinary fetch failure
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Known quote types, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RateKind {
    /// Official bank rate
    Oficial,
    /// Parallel market rate
    Blue,
}

impl RateKind {
    /// All kinds in the order they are reported
    pub const ALL: [Self; 2] = [Self::Oficial, Self::Blue];

    /// Spoken label, also the name used by the rates API
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Oficial => "oficial",
            Self::Blue => "blue",
        }
    }

    /// Parse a label, ignoring case and surrounding whitespace
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
    }
}

/// One entry of the rates API response
#[derive(Debug, Clone, Deserialize)]
pub struct RateQuote {
    /// Display name, e.g. "Oficial" or "Blue"
    #[serde(rename = "nombre", default)]
    pub name: String,

    /// Sale price in pesos
    #[serde(rename = "venta", default, deserialize_with = "lenient_price")]
    pub sale: Option<f64>,
}

/// Accept prices sent either as JSON numbers or numeric strings
fn lenient_price<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Parse a rates API body
///
/// # Errors
///
/// Returns error if the body is not a JSON array of quotes
pub fn parse_quotes(body: &str) -> Result<Vec<RateQuote>> {
    Ok(serde_json::from_str(body)?)
}

/// Sale prices by kind, fetched fresh for each request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeRateSnapshot {
    rates: BTreeMap<RateKind, f64>,
}

impl ExchangeRateSnapshot {
    /// Create an empty snapshot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from API quotes
    ///
    /// Quotes with unknown names or without a positive price are skipped.
    #[must_use]
    pub fn from_quotes(quotes: &[RateQuote]) -> Self {
        let mut snapshot = Self::new();
        for quote in quotes {
            let Some(kind) = RateKind::from_label(&quote.name) else {
                continue;
            };
            match quote.sale {
                Some(price) if price > 0.0 => snapshot.insert(kind, price),
                _ => tracing::debug!(name = %quote.name, "skipping quote without price"),
            }
        }
        snapshot
    }

    /// Set the price for a kind
    pub fn insert(&mut self, kind: RateKind, price: f64) {
        self.rates.insert(kind, price);
    }

    /// Price for a kind, if quoted
    #[must_use]
    pub fn get(&self, kind: RateKind) -> Option<f64> {
        self.rates.get(&kind).copied()
    }

    /// Whether no kind is quoted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Source of exchange rate snapshots
#[async_trait]
pub trait RateFetcher: Send + Sync {
    /// Fetch the current rates
    ///
    /// # Errors
    ///
    /// Returns error if the rates cannot be retrieved or parsed
    async fn fetch_rates(&self) -> Result<ExchangeRateSnapshot>;
}

/// Fetches rates from a JSON HTTP endpoint
pub struct HttpRateFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpRateFetcher {
    /// Create a fetcher for the given URL
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RateFetcher for HttpRateFetcher {
    async fn fetch_rates(&self) -> Result<ExchangeRateSnapshot> {
        tracing::debug!(url = %self.url, "fetching exchange rates");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Rates(format!("rates API returned {status}")));
        }

        let body = response.text().await?;
        let snapshot = ExchangeRateSnapshot::from_quotes(&parse_quotes(&body)?);

        tracing::debug!(?snapshot, "exchange rates received");
        Ok(snapshot)
    }
}

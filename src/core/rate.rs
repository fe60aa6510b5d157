//! Rate records and the persisted snapshot

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Currency identified on the quoting page.
///
/// Labels that do not map onto one of the known codes are kept verbatim in
/// [`Currency::Other`], so the set stays open to whatever the page lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    Usd,
    Eur,
    Mlc,
    Cup,
    Other(String),
}

impl Currency {
    pub fn code(&self) -> &str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Mlc => "MLC",
            Currency::Cup => "CUP",
            Currency::Other(label) => label,
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        match code.as_str() {
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            "MLC" => Currency::Mlc,
            "CUP" => Currency::Cup,
            _ => Currency::Other(code),
        }
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

/// A single buy quote. `buy_rate` is normalized text and is not guaranteed to
/// parse as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    #[serde(rename = "moneda")]
    pub currency: Currency,
    #[serde(rename = "compra")]
    pub buy_rate: String,
}

impl RateRecord {
    pub fn new(currency: Currency, buy_rate: impl Into<String>) -> Self {
        Self {
            currency,
            buy_rate: buy_rate.into(),
        }
    }
}

/// The full content of the output file, replaced on every successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "ultima_actualizacion")]
    pub updated_at: DateTime<Local>,
    #[serde(rename = "fuente")]
    pub source: String,
    #[serde(rename = "url")]
    pub source_url: String,
    #[serde(rename = "tasas_compra")]
    pub rates: Vec<RateRecord>,
}

impl Snapshot {
    pub fn new(source: &str, source_url: &str, rates: Vec<RateRecord>) -> Self {
        Self {
            updated_at: Local::now(),
            source: source.to_string(),
            source_url: source_url.to_string(),
            rates,
        }
    }
}

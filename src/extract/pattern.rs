use super::{ExtractionStrategy, RateSet, visible_text};
use crate::core::{Currency, RateRecord};
use anyhow::{Context, Result};
use regex::Regex;
use scraper::Html;
use tracing::debug;

/// Currency aliases followed by the first numeric run after them.
const PATTERNS: [(&str, Currency); 4] = [
    (r"(?i)(?:USD|DÓLAR|DOLAR)[^0-9]*([0-9.,]+)", Currency::Usd),
    (r"(?i)(?:EUR|EURO)[^0-9]*([0-9.,]+)", Currency::Eur),
    (
        r"(?i)(?:MLC|MONEDA LIBREMENTE CONVERTIBLE)[^0-9]*([0-9.,]+)",
        Currency::Mlc,
    ),
    (r"(?i)(?:CUP|PESO CUBANO)[^0-9]*([0-9.,]+)", Currency::Cup),
];

/// Scans the flattened page text with one labeled pattern per currency.
pub struct PatternStrategy {
    patterns: Vec<(Regex, Currency)>,
}

impl PatternStrategy {
    pub fn new() -> Result<Self> {
        let patterns = PATTERNS
            .into_iter()
            .map(|(pattern, currency)| {
                Regex::new(pattern)
                    .with_context(|| format!("Invalid rate pattern for {currency}"))
                    .map(|regex| (regex, currency))
            })
            .collect::<Result<_>>()?;
        Ok(Self { patterns })
    }

    /// Takes the first match of every pattern, at most one record per
    /// currency.
    pub fn extract_text(&self, text: &str) -> Vec<RateRecord> {
        let mut rates = RateSet::default();
        for (regex, currency) in &self.patterns {
            if rates.contains(currency) {
                continue;
            }
            if let Some(rate) = regex.captures(text).and_then(|caps| caps.get(1)) {
                debug!(%currency, rate = rate.as_str(), "Buy rate found in page text");
                rates.insert(currency.clone(), rate.as_str());
            }
        }
        rates.into_records()
    }
}

impl ExtractionStrategy for PatternStrategy {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn extract(&self, page: &Html) -> Vec<RateRecord> {
        let text = visible_text(page.root_element()).collect::<String>();
        self.extract_text(&text)
    }
}

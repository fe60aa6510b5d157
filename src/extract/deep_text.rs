use super::{ExtractionStrategy, RateSet, selector, visible_text};
use crate::core::{Currency, RateRecord};
use anyhow::{Context, Result};
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

/// Markers that make an element's text worth scanning for numbers.
const TEXT_KEYWORDS: &[&str] = &["USD", "EUR", "MLC", "COMPRA"];

/// Currency detection for free text. CUP is not recognized here.
const TEXT_CURRENCIES: [(Currency, &[&str]); 3] = [
    (Currency::Usd, &["USD", "DÓLAR", "DOLAR"]),
    (Currency::Eur, &["EUR", "EURO"]),
    (Currency::Mlc, &["MLC"]),
];

/// Last resort: looks at each paragraph, container, span and list item on its
/// own and takes the first number next to a currency mention.
pub struct DeepTextStrategy {
    elements: Selector,
    number: Regex,
}

impl DeepTextStrategy {
    pub fn new() -> Result<Self> {
        Ok(Self {
            elements: selector("p, div, span, li")?,
            number: Regex::new(r"[0-9]+[.,]?[0-9]*").context("Invalid number pattern")?,
        })
    }

    fn currency_of(upper: &str) -> Option<Currency> {
        TEXT_CURRENCIES
            .into_iter()
            .find(|(_, aliases)| aliases.iter().any(|alias| upper.contains(alias)))
            .map(|(currency, _)| currency)
    }

    /// Scans element texts in document order.
    pub fn extract_texts<I, S>(&self, texts: I) -> Vec<RateRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rates = RateSet::default();
        for text in texts {
            let text = text.as_ref().trim();
            let upper = text.to_uppercase();
            if !TEXT_KEYWORDS.iter().any(|keyword| upper.contains(keyword)) {
                continue;
            }
            let Some(number) = self.number.find(text) else {
                continue;
            };
            let Some(currency) = Self::currency_of(&upper) else {
                continue;
            };
            if rates.insert(currency.clone(), number.as_str()) {
                debug!(%currency, rate = number.as_str(), "Buy rate found in element text");
            }
        }
        rates.into_records()
    }
}

impl ExtractionStrategy for DeepTextStrategy {
    fn name(&self) -> &'static str {
        "deep-text"
    }

    fn extract(&self, page: &Html) -> Vec<RateRecord> {
        self.extract_texts(
            page.select(&self.elements)
                .map(|element| visible_text(element).collect::<String>()),
        )
    }
}

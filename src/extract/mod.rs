//! Turns the quoting page into buy-rate records.
//!
//! Extraction is an ordered list of strategies with decreasing structural
//! assumptions about the page. Each strategy is a pure function of the parsed
//! document and the first one returning records wins.

pub mod classify;
pub mod deep_text;
pub mod normalize;
pub mod pattern;
pub mod table;

use crate::core::{Currency, RateRecord};
use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info};

pub use classify::{classify_currency, is_currency_row};
pub use deep_text::DeepTextStrategy;
pub use normalize::normalize_number;
pub use pattern::PatternStrategy;
pub use table::TableStrategy;

pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Records found on the page in discovery order. Empty means the strategy
    /// found nothing usable.
    fn extract(&self, page: &Html) -> Vec<RateRecord>;
}

pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Extractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Table, then labeled patterns over the page text, then a scan of
    /// individual text elements.
    pub fn with_default_strategies() -> Result<Self> {
        Ok(Self::new(vec![
            Box::new(TableStrategy::new()?),
            Box::new(PatternStrategy::new()?),
            Box::new(DeepTextStrategy::new()?),
        ]))
    }

    pub fn extract(&self, html: &str) -> Vec<RateRecord> {
        let page = Html::parse_document(html);
        self.extract_page(&page)
    }

    pub fn extract_page(&self, page: &Html) -> Vec<RateRecord> {
        for strategy in &self.strategies {
            let records = strategy.extract(page);
            if !records.is_empty() {
                info!(
                    strategy = strategy.name(),
                    count = records.len(),
                    "Extracted buy rates"
                );
                return records;
            }
            debug!(strategy = strategy.name(), "No rates found, trying next strategy");
        }
        Vec::new()
    }
}

/// Accumulates records keeping only the first one seen per currency.
#[derive(Debug, Default)]
pub(crate) struct RateSet {
    seen: HashSet<Currency>,
    records: Vec<RateRecord>,
}

impl RateSet {
    pub(crate) fn contains(&self, currency: &Currency) -> bool {
        self.seen.contains(currency)
    }

    /// Returns false when the currency was already recorded.
    pub(crate) fn insert(&mut self, currency: Currency, buy_rate: &str) -> bool {
        if !self.seen.insert(currency.clone()) {
            return false;
        }
        self.records
            .push(RateRecord::new(currency, normalize_number(buy_rate)));
        true
    }

    pub(crate) fn into_records(self) -> Vec<RateRecord> {
        self.records
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector '{css}': {e}"))
}

/// Elements whose contents are never rendered as page text.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Text fragments of an element in document order, leaving out anything
/// inside a hidden tag.
pub(crate) fn visible_text<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| HIDDEN_TAGS.contains(&e.name()))
        });
        (!hidden).then_some(&**text)
    })
}

/// Concatenated visible text of an element, each fragment trimmed.
pub(crate) fn stripped_text(element: &ElementRef) -> String {
    visible_text(*element)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct FixedStrategy {
        name: &'static str,
        records: Vec<RateRecord>,
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl ExtractionStrategy for FixedStrategy {
        fn name(&self) -> &'static str {
            self.name
        }

        fn extract(&self, _page: &Html) -> Vec<RateRecord> {
            self.calls.lock().unwrap().push(self.name);
            self.records.clone()
        }
    }

    fn fixed(
        name: &'static str,
        records: Vec<RateRecord>,
        calls: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Box<dyn ExtractionStrategy> {
        Box::new(FixedStrategy {
            name,
            records,
            calls: Arc::clone(calls),
        })
    }

    #[test]
    fn test_falls_back_through_every_strategy() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let extractor = Extractor::new(vec![
            fixed("table", vec![], &calls),
            fixed("pattern", vec![], &calls),
            fixed("deep", vec![RateRecord::new(Currency::Usd, "120")], &calls),
        ]);

        let records = extractor.extract("<html></html>");
        assert_eq!(records, vec![RateRecord::new(Currency::Usd, "120")]);
        assert_eq!(*calls.lock().unwrap(), vec!["table", "pattern", "deep"]);
    }

    #[test]
    fn test_stops_at_first_non_empty_strategy() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let extractor = Extractor::new(vec![
            fixed("table", vec![], &calls),
            fixed("pattern", vec![RateRecord::new(Currency::Eur, "130")], &calls),
            fixed("deep", vec![RateRecord::new(Currency::Usd, "120")], &calls),
        ]);

        let records = extractor.extract("<html></html>");
        assert_eq!(records, vec![RateRecord::new(Currency::Eur, "130")]);
        assert_eq!(*calls.lock().unwrap(), vec!["table", "pattern"]);
    }

    #[test]
    fn test_empty_when_all_strategies_fail() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let extractor = Extractor::new(vec![
            fixed("table", vec![], &calls),
            fixed("pattern", vec![], &calls),
            fixed("deep", vec![], &calls),
        ]);

        assert!(extractor.extract("<p>nada</p>").is_empty());
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_default_strategies_prefer_table_over_text() {
        let html = r#"
            <p>USD 999</p>
            <table>
              <tr><th>Moneda</th><th>Compra</th><th>Venta</th></tr>
              <tr><td>USD</td><td>120</td><td>125</td></tr>
            </table>"#;
        let extractor = Extractor::with_default_strategies().unwrap();
        assert_eq!(
            extractor.extract(html),
            vec![RateRecord::new(Currency::Usd, "120")]
        );
    }

    #[test]
    fn test_default_strategies_use_page_text_without_table() {
        let html = "<html><body><p>Hoy el EUR se compra a 330,5 CUP</p></body></html>";
        let extractor = Extractor::with_default_strategies().unwrap();
        let records = extractor.extract(html);
        assert_eq!(records[0], RateRecord::new(Currency::Eur, "330.5"));
    }

    #[test]
    fn test_default_strategies_ignore_inline_scripts() {
        let html = r#"<head><script>window.cfg = {"usd": 7, "eur": 9};</script></head>
            <body><p>USD 320</p><p>EUR 335</p></body>"#;
        let extractor = Extractor::with_default_strategies().unwrap();
        assert_eq!(
            extractor.extract(html),
            vec![
                RateRecord::new(Currency::Usd, "320"),
                RateRecord::new(Currency::Eur, "335"),
            ]
        );
    }

    #[test]
    fn test_visible_text_skips_hidden_tags() {
        let page = Html::parse_document(
            r#"<html><head><style>.usd { width: 10px }</style></head><body>
              <div id="rates">Compra <script>var usd = 1;</script><b>USD</b>
                <template><span>EUR 9</span></template>320</div>
            </body></html>"#,
        );
        let div = page.select(&selector("#rates").unwrap()).next().unwrap();

        assert_eq!(stripped_text(&div), "CompraUSD320");
        let page_text = visible_text(page.root_element()).collect::<String>();
        assert!(!page_text.contains("width"));
        assert!(!page_text.contains("var usd"));
    }

    #[test]
    fn test_rate_set_keeps_first_occurrence() {
        let mut set = RateSet::default();
        assert!(set.insert(Currency::Usd, "120,5"));
        assert!(!set.insert(Currency::Usd, "999"));
        assert!(set.contains(&Currency::Usd));
        assert_eq!(
            set.into_records(),
            vec![RateRecord::new(Currency::Usd, "120.5")]
        );
    }
}

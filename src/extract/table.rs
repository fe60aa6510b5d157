use super::classify::{QUALIFYING_RATE_INDEX, classify_currency, is_currency_row};
use super::{ExtractionStrategy, RateSet, selector, stripped_text, visible_text};
use crate::core::RateRecord;
use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Words in a table's text that make it worth parsing at all.
const CANDIDATE_KEYWORDS: &[&str] = &["mediana", "compra", "venta", "usd", "eur", "mlc", "moneda"];

/// Reads rates out of an HTML table with a currency column and a buy column.
pub struct TableStrategy {
    candidate_keywords: &'static [&'static str],
    buy_header: &'static str,
    table: Selector,
    row: Selector,
    cell: Selector,
}

impl TableStrategy {
    pub fn new() -> Result<Self> {
        Ok(Self {
            candidate_keywords: CANDIDATE_KEYWORDS,
            buy_header: "compra",
            table: selector("table")?,
            row: selector("tr")?,
            cell: selector("td, th")?,
        })
    }

    fn is_candidate(&self, table: &ElementRef) -> bool {
        let text = visible_text(*table).collect::<String>().to_lowercase();
        self.candidate_keywords
            .iter()
            .any(|keyword| text.contains(keyword))
    }

    fn rows(&self, table: &ElementRef) -> Vec<Vec<String>> {
        table
            .select(&self.row)
            .map(|row| row.select(&self.cell).map(|c| stripped_text(&c)).collect())
            .collect()
    }

    /// Buy column from the first row's headers, or the second column when no
    /// header matches.
    fn buy_index(&self, rows: &[Vec<String>]) -> usize {
        rows.first()
            .and_then(|header| {
                header
                    .iter()
                    .position(|cell| cell.to_lowercase() == self.buy_header)
            })
            .unwrap_or(QUALIFYING_RATE_INDEX)
    }

    /// Extracts one record per currency from already split rows.
    pub fn extract_rows(&self, rows: &[Vec<String>]) -> Vec<RateRecord> {
        let buy_index = self.buy_index(rows);
        let mut rates = RateSet::default();

        for row in rows.iter().filter(|row| row.len() >= 2) {
            debug!(?row, "Table row");
            if !is_currency_row(row.as_slice()) {
                continue;
            }

            let currency = classify_currency(&row[0]);
            if rates.contains(&currency) {
                debug!(%currency, "Currency already recorded, skipping row");
                continue;
            }
            let Some(buy_cell) = row.get(buy_index) else {
                debug!(%currency, buy_index, "Row has no buy column, skipping");
                continue;
            };
            rates.insert(currency, buy_cell);
        }

        rates.into_records()
    }
}

impl ExtractionStrategy for TableStrategy {
    fn name(&self) -> &'static str {
        "table"
    }

    fn extract(&self, page: &Html) -> Vec<RateRecord> {
        for (i, table) in page.select(&self.table).enumerate() {
            if !self.is_candidate(&table) {
                debug!(table = i + 1, "Table has no rate keywords, skipping");
                continue;
            }
            debug!(table = i + 1, "Analyzing rate table");
            let records = self.extract_rows(&self.rows(&table));
            if !records.is_empty() {
                return records;
            }
        }
        Vec::new()
    }
}

//! Currency label and table row classification

use crate::core::Currency;

/// Aliases per known currency, checked in this order. A label mentioning both
/// "EUR" and "PESO" is therefore EUR.
static CURRENCY_ALIASES: [(Currency, &[&str]); 4] = [
    (Currency::Usd, &["USD", "DÓLAR", "DOLAR"]),
    (Currency::Eur, &["EUR", "EURO"]),
    (Currency::Mlc, &["MLC", "MONEDA LIBREMENTE CONVERTIBLE"]),
    (Currency::Cup, &["CUP", "PESO"]),
];

/// Words that mark the first cell of a row as a currency label.
pub const ROW_KEYWORDS: &[&str] = &[
    "USD",
    "EUR",
    "MLC",
    "CUP",
    "EURO",
    "DÓLAR",
    "DOLAR",
    "PESO",
    "MONEDA LIBREMENTE CONVERTIBLE",
];

/// Cell that must hold a digit for a row to qualify. Row qualification always
/// looks here, even when the header puts the buy column elsewhere.
pub const QUALIFYING_RATE_INDEX: usize = 1;

/// Maps a free text label onto a currency. Unknown labels pass through trimmed.
pub fn classify_currency(label: &str) -> Currency {
    let upper = label.to_uppercase();
    CURRENCY_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|alias| upper.contains(alias)))
        .map(|(currency, _)| currency.clone())
        .unwrap_or_else(|| Currency::Other(label.trim().to_string()))
}

/// True when the row starts with a currency label and carries a digit in the
/// assumed buy cell.
pub fn is_currency_row<S: AsRef<str>>(cells: &[S]) -> bool {
    let Some(first) = cells.first() else {
        return false;
    };
    let label = first.as_ref().to_uppercase();
    let has_currency = ROW_KEYWORDS.iter().any(|keyword| label.contains(keyword));

    let has_numbers = cells
        .get(QUALIFYING_RATE_INDEX)
        .is_some_and(|cell| cell.as_ref().chars().any(|c| c.is_ascii_digit()));

    has_currency && has_numbers
}

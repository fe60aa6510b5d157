/// Reduces a locale formatted number to digits and periods.
///
/// Every character other than an ASCII digit, comma or period is dropped and
/// commas become periods. The output is not validated, so `"1.234,56"` comes
/// back as `"1.234.56"`.
pub fn normalize_number(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mixed_separators() {
        assert_eq!(normalize_number("1.234,56 CUP"), "1.234.56");
    }

    #[test]
    fn test_normalize_strips_symbols_and_whitespace() {
        assert_eq!(normalize_number(" $ 120,50\u{a0}"), "120.50");
        assert_eq!(normalize_number("365 CUP"), "365");
    }

    #[test]
    fn test_normalize_empty_and_textual_input() {
        assert_eq!(normalize_number(""), "");
        assert_eq!(normalize_number("ver abajo"), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_number("335.5");
        assert_eq!(once, "335.5");
        assert_eq!(normalize_number(&once), once);
    }
}

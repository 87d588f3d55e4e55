//! Numeric token normalization.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a raw textual token into a signed decimal.
///
/// A value wrapped in parentheses is negative (accounting convention).
/// Thousands separators, whitespace, and currency letters/glyphs are
/// stripped before parsing. A token that is empty or letters-only after
/// stripping yields `None`, as does any parse failure; normalization never
/// aborts the caller.
pub fn normalize(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let negative = trimmed.starts_with('(') && trimmed.ends_with(')');

    let cleaned: String = trimmed
        .chars()
        .filter(|c| {
            !matches!(c, '(' | ')' | ',' | '$' | '€' | '£' | '¥' | '₹')
                && !c.is_whitespace()
                && !c.is_alphabetic()
        })
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let value = Decimal::from_str(&cleaned).ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parenthesized_is_negative() {
        assert_eq!(normalize("(1,234)"), Some(dec("-1234")));
        assert_eq!(normalize("(500)"), Some(dec("-500")));
    }

    #[test]
    fn test_thousands_separators_stripped() {
        assert_eq!(normalize("1,234.5"), Some(dec("1234.5")));
        assert_eq!(normalize("110,845,663"), Some(dec("110845663")));
    }

    #[test]
    fn test_currency_markers_stripped() {
        assert_eq!(normalize("Rs1,000"), Some(dec("1000")));
        assert_eq!(normalize("$ 250"), Some(dec("250")));
        assert_eq!(normalize("₹12,500"), Some(dec("12500")));
    }

    #[test]
    fn test_empty_and_letters_only_yield_none() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize("abc"), None);
        assert_eq!(normalize("Note"), None);
    }

    #[test]
    fn test_parse_failure_yields_none() {
        assert_eq!(normalize("12-34"), None);
        assert_eq!(normalize("5%"), None);
        assert_eq!(normalize("1.2.3"), None);
    }

    #[test]
    fn test_plain_values() {
        assert_eq!(normalize("42"), Some(dec("42")));
        assert_eq!(normalize("-500"), Some(dec("-500")));
        assert_eq!(normalize(" 7 "), Some(dec("7")));
    }
}

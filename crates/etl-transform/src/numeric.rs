//! Numeric parsing and rounding.

/// Parse a string value to numeric (f64).
///
/// Handles common numeric formats:
/// - Standard numbers: "123", "-45.67"
/// - Thousands separators: "1,234,567"
/// - Whitespace: "  123  "
/// - Scientific notation: "1.23e5"
///
/// Returns None if the value cannot be parsed as a number.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return None;
    }

    // Remove thousands separators and whitespace
    let cleaned = trimmed
        .replace(',', "")
        .replace(' ', "")
        .replace('\u{a0}', ""); // Non-breaking space

    cleaned.parse().ok()
}

/// Round to a fixed number of decimal places.
///
/// Rounding mode is round-half-away-from-zero (`f64::round` on the shifted
/// value), i.e. round-half-up for positive values. This is the one rounding
/// mode used by every job in this workspace.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_simple_numbers() {
        assert_eq!(parse_numeric("123"), Some(123.0));
        assert_eq!(parse_numeric("-45.67"), Some(-45.67));
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(parse_numeric("1,234,567"), Some(1234567.0));
        assert_eq!(parse_numeric("1,234.56"), Some(1234.56));
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(parse_numeric("  123  "), Some(123.0));
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(parse_numeric("1.23e5"), Some(123000.0));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("  "), None);
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("12.34.56"), None);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to(1.005, 2), 1.0); // 1.005 is actually 1.00499.. in binary
        assert_eq!(round_to(1.651, 2), 1.65);
        assert_eq!(round_to(54.431, 2), 54.43);
        assert_eq!(round_to(2.675, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }

    proptest! {
        #[test]
        fn round_is_idempotent(value in -1.0e9f64..1.0e9, decimals in 0u32..6) {
            let once = round_to(value, decimals);
            let twice = round_to(once, decimals);
            prop_assert_eq!(once.to_bits(), twice.to_bits());
        }
    }
}

//! Coercion of raw form text to engine inputs.
//!
//! The engine is total over its numeric domain; it never sees parse errors.
//! Anything that does not read as a decimal number becomes zero here, and
//! quantities, prices, and rates are floored at zero (the form's inputs do
//! not go below it) and capped at [`MAX_INPUT_UNITS`] so a pathological
//! paste cannot push the totals anywhere near the decimal range limit.

use rust_decimal::Decimal;

/// Largest quantity, unit price, or rate the form accepts (one trillion).
pub const MAX_INPUT_UNITS: i64 = 1_000_000_000_000;

/// Parse a decimal, treating empty or malformed input as zero.
pub fn parse_or_zero(raw: &str) -> Decimal {
    raw.trim().parse().unwrap_or(Decimal::ZERO)
}

/// Parse a decimal, flooring malformed input and negatives at zero and
/// capping at [`MAX_INPUT_UNITS`].
pub fn parse_non_negative(raw: &str) -> Decimal {
    parse_or_zero(raw).clamp(Decimal::ZERO, Decimal::from(MAX_INPUT_UNITS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn well_formed_numbers_parse() {
        assert_eq!(parse_or_zero("10.005"), dec!(10.005));
        assert_eq!(parse_or_zero("  7.5 "), dec!(7.5));
        assert_eq!(parse_or_zero("0"), Decimal::ZERO);
    }

    #[test]
    fn malformed_or_empty_input_becomes_zero() {
        assert_eq!(parse_or_zero(""), Decimal::ZERO);
        assert_eq!(parse_or_zero("three"), Decimal::ZERO);
        assert_eq!(parse_or_zero("1,5"), Decimal::ZERO);
    }

    #[test]
    fn negatives_are_floored_at_zero() {
        assert_eq!(parse_non_negative("-3"), Decimal::ZERO);
        assert_eq!(parse_non_negative("2.5"), dec!(2.5));
    }

    #[test]
    fn oversized_magnitudes_are_capped() {
        // Parseable, but near Decimal::MAX; the cap keeps downstream
        // arithmetic far from the range limit.
        assert_eq!(
            parse_non_negative("79228162514264337593543950335"),
            Decimal::from(MAX_INPUT_UNITS)
        );
        assert_eq!(
            parse_non_negative("1000000000001"),
            Decimal::from(MAX_INPUT_UNITS)
        );
        assert_eq!(parse_non_negative("999999999999"), dec!(999999999999));
    }
}

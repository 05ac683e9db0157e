//! Money rounding rule.
//!
//! Every derived monetary value in an invoice (line amount, subtotal, tax,
//! discount, total) is rounded to 2 decimal places with half-up rounding
//! (`MidpointAwayFromZero`). The rule is pinned here once so totals are
//! reproducible: decimal arithmetic carries exact values, and rounding is
//! applied at each derived-value boundary rather than once at the end.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary value to 2 decimal places, half-up.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_up_at_the_midpoint() {
        assert_eq!(round2(dec!(1.005)), dec!(1.01));
        assert_eq!(round2(dec!(1.015)), dec!(1.02));
        assert_eq!(round2(dec!(-1.005)), dec!(-1.01));
    }

    #[test]
    fn below_midpoint_rounds_down() {
        assert_eq!(round2(dec!(2.001)), dec!(2.00));
        assert_eq!(round2(dec!(1.0005)), dec!(1.00));
    }

    #[test]
    fn already_rounded_values_pass_through() {
        assert_eq!(round2(dec!(20.01)), dec!(20.01));
        assert_eq!(round2(Decimal::ZERO), Decimal::ZERO);
    }
}

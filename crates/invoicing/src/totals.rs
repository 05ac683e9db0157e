//! The totals engine.
//!
//! Pure, total functions: no IO, no error cases, no state between calls.
//! Rounding happens at every derived-value boundary (line amount first, then
//! subtotal from the rounded line amounts, then tax and discount from the
//! rounded subtotal, then total). Summing at full precision and rounding
//! once at the end can produce different totals; the per-step order is the
//! contract.

use rust_decimal::Decimal;

use facture_core::round2;

use crate::invoice::{Invoice, LineItem};

/// Amount for one line: `round2(quantity * unit_price)`.
///
/// Arithmetic saturates at the decimal range limits: the functions here are
/// total, so even absurd inputs produce a value rather than a panic.
pub fn line_amount(quantity: Decimal, unit_price: Decimal) -> Decimal {
    round2(quantity.saturating_mul(unit_price))
}

/// Subtotal over freshly recomputed line amounts.
///
/// Stored `amount` fields are ignored; a stale value in a snapshot can never
/// leak into the subtotal.
pub fn subtotal(items: &[LineItem]) -> Decimal {
    round2(
        items
            .iter()
            .map(|item| line_amount(item.quantity, item.unit_price))
            .fold(Decimal::ZERO, |sum, amount| sum.saturating_add(amount)),
    )
}

/// Tax on the rounded subtotal: `round2(subtotal * tax_rate / 100)`.
pub fn tax_amount(subtotal: Decimal, tax_rate: Decimal) -> Decimal {
    round2(subtotal.saturating_mul(tax_rate) / Decimal::ONE_HUNDRED)
}

/// Discount on the rounded subtotal: `round2(subtotal * discount_rate / 100)`.
pub fn discount_amount(subtotal: Decimal, discount_rate: Decimal) -> Decimal {
    round2(subtotal.saturating_mul(discount_rate) / Decimal::ONE_HUNDRED)
}

/// Grand total: `round2(subtotal + tax - discount)`.
pub fn total(subtotal: Decimal, tax_amount: Decimal, discount_amount: Decimal) -> Decimal {
    round2(subtotal.saturating_add(tax_amount).saturating_sub(discount_amount))
}

/// Restore consistency after any mutation: every line `amount` and all four
/// aggregate fields are replaced with freshly derived values; everything
/// else (ids, dates, parties, notes, currency, rates) passes through
/// unchanged. Idempotent.
pub fn recompute(mut invoice: Invoice) -> Invoice {
    for item in &mut invoice.items {
        item.amount = line_amount(item.quantity, item.unit_price);
    }

    let sub = subtotal(&invoice.items);
    let tax = tax_amount(sub, invoice.tax_rate);
    let discount = discount_amount(sub, invoice.discount_rate);

    invoice.subtotal = sub;
    invoice.tax_amount = tax;
    invoice.discount_amount = discount;
    invoice.total = total(sub, tax, discount);
    invoice
}

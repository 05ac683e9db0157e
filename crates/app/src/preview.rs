//! On-screen preview formatting.
//!
//! The preview reads the derived fields off the invoice and formats them for
//! display; it never re-derives a total.

use rust_decimal::Decimal;

use facture_invoicing::{Currency, Invoice};

/// Two-decimal money display with the invoice's currency symbol.
pub fn format_money(amount: Decimal, currency: Currency) -> String {
    currency.format(amount)
}

/// Compact preview: items followed by the totals block.
pub fn render(invoice: &Invoice) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Invoice {}  (issued {}, due {})\n",
        invoice.invoice_number, invoice.issue_date, invoice.due_date
    ));
    if !invoice.from.name.is_empty() || !invoice.to.name.is_empty() {
        out.push_str(&format!(
            "From: {}   Bill to: {}\n",
            invoice.from.name, invoice.to.name
        ));
    }
    out.push('\n');

    for (row, item) in invoice.items.iter().enumerate() {
        let description = if item.description.is_empty() {
            "(no description)"
        } else {
            item.description.as_str()
        };
        out.push_str(&format!(
            "{:>3}. {:<30} {:>8} x {:>10} = {:>10}\n",
            row + 1,
            description,
            item.quantity,
            format_money(item.unit_price, invoice.currency),
            format_money(item.amount, invoice.currency)
        ));
    }

    out.push('\n');
    out.push_str(&format!(
        "{:>44}  {}\n",
        "Subtotal:",
        format_money(invoice.subtotal, invoice.currency)
    ));
    out.push_str(&format!(
        "{:>44}  {}\n",
        format!("{} ({}%):", invoice.tax_type.label(), invoice.tax_rate),
        format_money(invoice.tax_amount, invoice.currency)
    ));
    out.push_str(&format!(
        "{:>44}  -{}\n",
        format!("Discount ({}%):", invoice.discount_rate),
        format_money(invoice.discount_amount, invoice.currency)
    ));
    out.push_str(&format!(
        "{:>44}  {}\n",
        "Total:",
        format_money(invoice.total, invoice.currency)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use facture_invoicing::{LineItem, recompute};
    use rust_decimal_macros::dec;

    #[test]
    fn money_is_always_two_decimals() {
        assert_eq!(format_money(dec!(7.5), Currency::Usd), "$7.50");
        assert_eq!(format_money(dec!(100), Currency::Eur), "€100.00");
        assert_eq!(format_money(Decimal::ZERO, Currency::Inr), "₹0.00");
    }

    #[test]
    fn render_shows_the_derived_totals() {
        let mut invoice = Invoice::draft_on(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap());
        invoice.items = vec![LineItem::new("design", dec!(2), dec!(10.005))];
        invoice.tax_rate = dec!(10);
        invoice.discount_rate = dec!(5);
        let preview = render(&recompute(invoice));

        assert!(preview.contains("$20.01"));
        assert!(preview.contains("$2.00"));
        assert!(preview.contains("-$1.00"));
        assert!(preview.contains("$21.01"));
    }
}

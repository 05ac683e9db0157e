//! Plain-text invoice document.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use facture_invoicing::{Currency, Invoice};

const PAGE_WIDTH: usize = 72;
/// Item rows per page before a form-feed break.
const ROWS_PER_PAGE: usize = 30;

/// Export-boundary error.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn money(amount: Decimal, currency: Currency) -> String {
    currency.format(amount)
}

fn rule(ch: char) -> String {
    ch.to_string().repeat(PAGE_WIDTH)
}

fn header(invoice: &Invoice, out: &mut String) {
    out.push_str(&rule('='));
    out.push('\n');
    out.push_str(&format!(
        "{:<40}{:>32}\n",
        "INVOICE",
        format!("#{}", invoice.invoice_number)
    ));
    out.push_str(&format!(
        "{:<40}{:>32}\n",
        format!("Issue date: {}", invoice.issue_date),
        format!("Due date: {}", invoice.due_date)
    ));
    out.push_str(&rule('='));
    out.push('\n');
}

fn parties(invoice: &Invoice, out: &mut String) {
    out.push_str("\nFROM\n");
    for line in [&invoice.from.name, &invoice.from.email, &invoice.from.address] {
        if !line.is_empty() {
            out.push_str(&format!("  {line}\n"));
        }
    }
    out.push_str("\nBILL TO\n");
    for line in [&invoice.to.name, &invoice.to.email, &invoice.to.address] {
        if !line.is_empty() {
            out.push_str(&format!("  {line}\n"));
        }
    }
    out.push('\n');
}

fn items_header(out: &mut String) {
    out.push_str(&format!(
        "{:<36}{:>8}{:>14}{:>14}\n",
        "DESCRIPTION", "QTY", "PRICE", "AMOUNT"
    ));
    out.push_str(&rule('-'));
    out.push('\n');
}

fn totals(invoice: &Invoice, out: &mut String) {
    let currency = invoice.currency;
    out.push_str(&rule('-'));
    out.push('\n');
    out.push_str(&format!(
        "{:>58}{:>14}\n",
        "Subtotal:",
        money(invoice.subtotal, currency)
    ));
    out.push_str(&format!(
        "{:>58}{:>14}\n",
        format!("{} ({}%):", invoice.tax_type.label(), invoice.tax_rate),
        money(invoice.tax_amount, currency)
    ));
    out.push_str(&format!(
        "{:>58}{:>14}\n",
        format!("Discount ({}%):", invoice.discount_rate),
        format!("-{}", money(invoice.discount_amount, currency))
    ));
    out.push_str(&format!(
        "{:>58}{:>14}\n",
        "TOTAL:",
        money(invoice.total, currency)
    ));
}

/// Render the invoice as a paginated plain-text document.
///
/// Long item lists break into pages separated by form feeds, each page
/// repeating the table header. Totals and notes follow the last item row.
pub fn render(invoice: &Invoice) -> String {
    let mut out = String::new();
    header(invoice, &mut out);
    parties(invoice, &mut out);
    items_header(&mut out);

    for (row, item) in invoice.items.iter().enumerate() {
        if row > 0 && row % ROWS_PER_PAGE == 0 {
            out.push('\u{0C}');
            items_header(&mut out);
        }
        let description = if item.description.is_empty() {
            "Item description"
        } else {
            item.description.as_str()
        };
        out.push_str(&format!(
            "{:<36}{:>8}{:>14}{:>14}\n",
            description,
            item.quantity,
            money(item.unit_price, invoice.currency),
            money(item.amount, invoice.currency)
        ));
    }

    totals(invoice, &mut out);

    if !invoice.notes.is_empty() {
        out.push_str("\nNOTES\n");
        for line in invoice.notes.lines() {
            out.push_str(&format!("  {line}\n"));
        }
    }

    out
}

/// Default output filename for an invoice, e.g. `Invoice-INV-2026-0307.txt`.
pub fn default_filename(invoice: &Invoice) -> String {
    let number: String = invoice
        .invoice_number
        .chars()
        .map(|c| if c.is_whitespace() || c == '/' { '-' } else { c })
        .collect();
    if number.is_empty() {
        "Invoice.txt".to_string()
    } else {
        format!("Invoice-{number}.txt")
    }
}

/// Render and write the invoice document.
pub fn export_to_file(invoice: &Invoice, path: &Path) -> Result<(), ExportError> {
    fs::write(path, render(invoice))?;
    info!(path = %path.display(), "invoice exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use facture_invoicing::{LineItem, recompute};
    use rust_decimal_macros::dec;

    fn test_invoice() -> Invoice {
        let mut invoice = Invoice::draft_on(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap());
        invoice.from.name = "Studio North".to_string();
        invoice.to.name = "Acme Ltd".to_string();
        invoice.items = vec![
            LineItem::new("widgets", dec!(3), dec!(15)),
            LineItem::new("shipping", dec!(1), dec!(7.5)),
        ];
        invoice.tax_rate = dec!(8);
        invoice.notes = "Payable within 15 days.".to_string();
        recompute(invoice)
    }

    #[test]
    fn render_shows_derived_numbers_with_currency_symbol() {
        let doc = render(&test_invoice());
        assert!(doc.contains("#INV-2026-0307"));
        assert!(doc.contains("Studio North"));
        assert!(doc.contains("Acme Ltd"));
        assert!(doc.contains("$45.00"));
        assert!(doc.contains("$7.50"));
        assert!(doc.contains("$52.50"));
        assert!(doc.contains("$4.20"));
        assert!(doc.contains("$56.70"));
        assert!(doc.contains("Payable within 15 days."));
    }

    #[test]
    fn long_item_lists_paginate_with_repeated_headers() {
        let mut invoice = test_invoice();
        invoice.items = (0..65)
            .map(|n| LineItem::new(format!("row {n}"), dec!(1), dec!(1)))
            .collect();
        let doc = render(&recompute(invoice));

        assert_eq!(doc.matches('\u{0C}').count(), 2);
        assert_eq!(doc.matches("DESCRIPTION").count(), 3);
    }

    #[test]
    fn default_filename_follows_the_invoice_number() {
        let invoice = test_invoice();
        assert_eq!(default_filename(&invoice), "Invoice-INV-2026-0307.txt");

        let mut unnamed = invoice.clone();
        unnamed.invoice_number.clear();
        assert_eq!(default_filename(&unnamed), "Invoice.txt");
    }

    #[test]
    fn export_writes_the_rendered_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let invoice = test_invoice();

        export_to_file(&invoice, &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, render(&invoice));
    }
}

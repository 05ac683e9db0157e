//! The editing session: owns the invoice, recomputes, persists.

use chrono::NaiveDate;
use tracing::warn;

use facture_core::{DomainError, DomainResult, LineItemId};
use facture_invoicing::{Currency, Invoice, LineItem, PaymentTerms, TaxType, recompute};
use facture_storage::SnapshotStore;

use crate::input::parse_non_negative;

/// Which field of a party block is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyField {
    Name,
    Email,
    Address,
}

/// Single-user editing session around one invoice.
///
/// Every mutation runs the totals engine exactly once and replaces the held
/// invoice with the result; the previous derived state is fully gone before
/// the next command is processed. Saving is a fire-and-forget side effect:
/// storage failures are logged, never surfaced as editing errors.
#[derive(Debug)]
pub struct EditorSession {
    invoice: Invoice,
    store: Option<SnapshotStore>,
}

impl EditorSession {
    /// Start from the saved snapshot if one loads, otherwise a fresh draft.
    pub fn load_or_draft(store: Option<SnapshotStore>) -> Self {
        let invoice = store
            .as_ref()
            .and_then(SnapshotStore::load)
            .unwrap_or_else(Invoice::draft);
        // A loaded snapshot may predate the current rounding rule; recompute
        // so the derived fields are consistent from the first render.
        Self {
            invoice: recompute(invoice),
            store,
        }
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    fn persist(&self) {
        if let Some(store) = &self.store
            && let Err(err) = store.save(&self.invoice)
        {
            warn!(%err, "failed to save invoice snapshot");
        }
    }

    /// Mutate a derived-input field (items or rates): recompute, then save.
    fn apply_recompute(&mut self, mutate: impl FnOnce(&mut Invoice)) {
        mutate(&mut self.invoice);
        self.invoice = recompute(self.invoice.clone());
        self.persist();
    }

    /// Mutate a pass-through field: no recompute needed, just save.
    fn apply(&mut self, mutate: impl FnOnce(&mut Invoice)) {
        mutate(&mut self.invoice);
        self.persist();
    }

    // --- line items ----------------------------------------------------

    /// Append a blank row (quantity 1, price 0). Returns its id.
    pub fn add_item(&mut self) -> LineItemId {
        let item = LineItem::blank();
        let id = item.id;
        self.apply_recompute(|invoice| invoice.items.push(item));
        id
    }

    /// Remove a row. The last remaining row cannot be removed (the form
    /// always shows at least one).
    pub fn remove_item(&mut self, id: LineItemId) -> DomainResult<()> {
        if self.invoice.items.len() == 1 {
            return Err(DomainError::invariant(
                "the last line item cannot be removed",
            ));
        }
        if !self.invoice.items.iter().any(|item| item.id == id) {
            return Err(DomainError::not_found());
        }
        self.apply_recompute(|invoice| invoice.items.retain(|item| item.id != id));
        Ok(())
    }

    pub fn set_item_description(&mut self, id: LineItemId, text: &str) -> DomainResult<()> {
        self.edit_item(id, |item| item.description = text.to_string())
    }

    pub fn set_item_quantity(&mut self, id: LineItemId, raw: &str) -> DomainResult<()> {
        let quantity = parse_non_negative(raw);
        self.edit_item(id, |item| item.quantity = quantity)
    }

    pub fn set_item_unit_price(&mut self, id: LineItemId, raw: &str) -> DomainResult<()> {
        let unit_price = parse_non_negative(raw);
        self.edit_item(id, |item| item.unit_price = unit_price)
    }

    fn edit_item(
        &mut self,
        id: LineItemId,
        edit: impl FnOnce(&mut LineItem),
    ) -> DomainResult<()> {
        if !self.invoice.items.iter().any(|item| item.id == id) {
            return Err(DomainError::not_found());
        }
        self.apply_recompute(|invoice| {
            if let Some(item) = invoice.items.iter_mut().find(|item| item.id == id) {
                edit(item);
            }
        });
        Ok(())
    }

    // --- rates ---------------------------------------------------------

    pub fn set_tax_rate(&mut self, raw: &str) {
        let rate = parse_non_negative(raw);
        self.apply_recompute(|invoice| invoice.tax_rate = rate);
    }

    pub fn set_discount_rate(&mut self, raw: &str) {
        let rate = parse_non_negative(raw);
        self.apply_recompute(|invoice| invoice.discount_rate = rate);
    }

    // --- pass-through fields -------------------------------------------

    pub fn set_invoice_number(&mut self, number: &str) {
        self.apply(|invoice| invoice.invoice_number = number.to_string());
    }

    pub fn set_issue_date(&mut self, date: NaiveDate) {
        self.apply(|invoice| invoice.issue_date = date);
    }

    pub fn set_due_date(&mut self, date: NaiveDate) {
        self.apply(|invoice| invoice.due_date = date);
    }

    /// Change payment terms, re-deriving the due date from the issue date.
    pub fn set_payment_terms(&mut self, terms: PaymentTerms) {
        self.apply(|invoice| {
            invoice.payment_terms = terms;
            invoice.due_date = terms.due_date(invoice.issue_date);
        });
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.apply(|invoice| invoice.currency = currency);
    }

    pub fn set_tax_type(&mut self, tax_type: TaxType) {
        self.apply(|invoice| invoice.tax_type = tax_type);
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.apply(|invoice| invoice.notes = notes.to_string());
    }

    pub fn set_party_field(&mut self, issuer: bool, field: PartyField, text: &str) {
        self.apply(|invoice| {
            let party = if issuer { &mut invoice.from } else { &mut invoice.to };
            match field {
                PartyField::Name => party.name = text.to_string(),
                PartyField::Email => party.email = text.to_string(),
                PartyField::Address => party.address = text.to_string(),
            }
        });
    }

    // --- lifecycle -----------------------------------------------------

    /// Back to the initial empty state, discarding the saved snapshot.
    pub fn reset(&mut self) {
        if let Some(store) = &self.store
            && let Err(err) = store.clear()
        {
            warn!(%err, "failed to clear saved invoice");
        }
        self.invoice = Invoice::draft();
    }
}

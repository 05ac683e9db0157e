//! Invoicing domain module.
//!
//! This crate contains the invoice data model and the totals engine,
//! implemented purely as deterministic domain logic (no IO, no UI, no
//! storage). Derived fields (`amount` per line, subtotal, tax, discount,
//! total) are only ever written by [`totals::recompute`]; every other field
//! passes through it unchanged.

pub mod invoice;
pub mod totals;

pub use invoice::{
    Currency, Invoice, InvoiceStatus, LineItem, Party, PaymentDetails, PaymentTerms, TaxType,
};
pub use totals::recompute;

//! `facture-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers, the domain error model, and the money rounding rule
//! shared by every derived value in an invoice.

pub mod error;
pub mod id;
pub mod money;

pub use error::{DomainError, DomainResult};
pub use id::{InvoiceId, LineItemId};
pub use money::round2;

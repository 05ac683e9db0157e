//! `facture-export`
//!
//! **Responsibility:** render an invoice to a paginated plain-text document
//! and write it to a file.
//!
//! The renderer consumes only the already-derived numbers on the invoice; it
//! never recomputes totals. Export failures are reported to the caller and
//! logged there; they cannot corrupt invoice state.

pub mod document;

pub use document::{ExportError, default_filename, export_to_file, render};

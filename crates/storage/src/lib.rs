//! `facture-storage`
//!
//! **Responsibility:** local persistence of the single invoice snapshot.
//!
//! Saves are best-effort side effects fired after each edit; loads are
//! defensive and fall back to nothing (the caller starts a fresh draft)
//! whenever the stored shape does not match the current fields. Storage can
//! never interrupt editing or recomputation.

pub mod snapshot;

pub use snapshot::{SnapshotStore, StorageError};

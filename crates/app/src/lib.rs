//! `facture-app`
//!
//! **Responsibility:** the editing layer around the totals engine.
//!
//! This crate owns the single in-memory invoice as an explicit value: every
//! mutating operation goes through [`session::EditorSession`], which calls
//! the engine's recompute exactly once per logical change and then fires a
//! best-effort save. Raw user text is coerced to numbers here, before it
//! reaches the engine.

pub mod input;
pub mod preview;
pub mod session;

pub use session::EditorSession;

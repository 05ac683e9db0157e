//! JSON snapshot store for the in-progress invoice.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use facture_invoicing::Invoice;

/// Environment variable overriding the data directory (tests, portable use).
pub const DATA_DIR_ENV: &str = "FACTURE_DATA_DIR";

const SNAPSHOT_FILE: &str = "invoice.json";

/// Storage-boundary error. Callers log these; they never become editing
/// errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no data directory available on this platform")]
    NoDataDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed store for the single invoice snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Open the store at the platform default location
    /// (`<data_dir>/facture/invoice.json`), honoring [`DATA_DIR_ENV`].
    pub fn open() -> Result<Self, StorageError> {
        let base = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .ok_or(StorageError::NoDataDir)?
                .join("facture"),
        };
        Ok(Self::at(base.join(SNAPSHOT_FILE)))
    }

    /// Open the store at an explicit snapshot path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the snapshot, creating parent directories as needed.
    pub fn save(&self, invoice: &Invoice) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(invoice)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "invoice snapshot saved");
        Ok(())
    }

    /// Load the snapshot, if one exists and still matches the current shape.
    ///
    /// A missing file is normal (first run). An unreadable or stale-shaped
    /// file is logged and treated as absent, so the caller falls back to a
    /// fresh draft instead of crashing on old data.
    pub fn load(&self) -> Option<Invoice> {
        if !self.path.exists() {
            return None;
        }
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to read invoice snapshot");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(invoice) => Some(invoice),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    %err,
                    "stored invoice does not match the current shape; starting fresh"
                );
                None
            }
        }
    }

    /// Remove the snapshot. Missing file is not an error.
    pub fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use facture_invoicing::{LineItem, recompute};
    use rust_decimal_macros::dec;

    fn store_in(dir: &tempfile::TempDir) -> SnapshotStore {
        SnapshotStore::at(dir.path().join("facture").join("invoice.json"))
    }

    fn test_invoice() -> Invoice {
        let mut invoice = Invoice::draft_on(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap());
        invoice.items = vec![LineItem::new("hosting", dec!(2), dec!(10.005))];
        invoice.tax_rate = dec!(10);
        recompute(invoice)
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let invoice = test_invoice();

        store.save(&invoice).unwrap();
        let loaded = store.load().expect("snapshot should load");
        assert_eq!(loaded, invoice);
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load().is_none());
    }

    #[test]
    fn stale_shape_falls_back_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();

        // An older shape with missing fields must not crash the loader.
        fs::write(store.path(), r#"{"invoiceNumber":"INV-1","items":[]}"#).unwrap();
        assert!(store.load().is_none());

        fs::write(store.path(), "not json at all").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn clear_removes_the_snapshot_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&test_invoice()).unwrap();

        store.clear().unwrap();
        assert!(store.load().is_none());
        // Second clear is a no-op, not an error.
        store.clear().unwrap();
    }
}

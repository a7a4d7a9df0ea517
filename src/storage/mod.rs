//! Storage layer for the ledger
//!
//! Loads the whole store from one JSON file, moving unreadable files aside,
//! and writes it back atomically after every change.

pub mod file_io;

pub use file_io::{quarantine, quarantine_path, read_json, write_json_atomic, QUARANTINE_SUFFIX};

use std::path::{Path, PathBuf};

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::LedgerResult;
use crate::models::Store;

/// How the store came to be in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No data file yet
    Fresh,
    /// Read from the data file
    Loaded,
    /// The data file was unreadable and has been moved to the given path
    Quarantined(PathBuf),
    /// The data file was unreadable and could not be moved aside; the next
    /// save replaces it
    Unreadable,
}

/// Owns the data file location and the optional audit log
pub struct Storage {
    path: PathBuf,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Storage for the given data file, without auditing
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            audit: None,
        }
    }

    /// Also append an audit entry for every change
    pub fn with_audit_log(mut self, log_path: impl Into<PathBuf>) -> Self {
        self.audit = Some(AuditLogger::new(log_path.into()));
        self
    }

    /// Path of the data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Load the store, starting fresh when the file is missing or unreadable
    ///
    /// Never fails. Parsed data is trusted as-is.
    pub fn load_store(&self) -> (Store, LoadStatus) {
        match read_json::<Store, _>(&self.path) {
            Ok(Some(store)) => {
                log::debug!(
                    "Loaded {} transaction(s) from {}",
                    store.len(),
                    self.path.display()
                );
                (store, LoadStatus::Loaded)
            }
            Ok(None) => (Store::new(), LoadStatus::Fresh),
            Err(e) => {
                log::warn!("{}", e);
                match quarantine(&self.path) {
                    Some(target) => {
                        log::warn!("Data file was corrupt and moved to {}", target.display());
                        (Store::new(), LoadStatus::Quarantined(target))
                    }
                    None => {
                        log::warn!(
                            "Data file {} was corrupt and could not be moved aside",
                            self.path.display()
                        );
                        (Store::new(), LoadStatus::Unreadable)
                    }
                }
            }
        }
    }

    /// Persist the whole store atomically
    pub fn save_store(&self, store: &Store) -> LedgerResult<()> {
        write_json_atomic(&self.path, store)?;
        log::debug!(
            "Saved {} transaction(s) to {}",
            store.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Record an audit entry; failures are logged, not returned
    pub fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                log::warn!("Could not write audit entry: {}", e);
            }
        }
    }
}

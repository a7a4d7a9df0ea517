//! User settings for the ledger
//!
//! Display and audit preferences, stored as `config.json` in the base
//! directory. Every field has a default so partial files load fine.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::storage::write_json_atomic;

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency symbol shown next to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// How many transactions "show latest" lists
    #[serde(default = "default_latest_count")]
    pub latest_count: usize,

    /// Whether changes are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_latest_count() -> usize {
    5
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency(),
            latest_count: default_latest_count(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            serde_json::from_str(&contents)
                .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Load settings, falling back to defaults when the file is unusable
    ///
    /// A missing or malformed settings file must never keep the ledger
    /// from opening, so read and parse failures are logged and replaced by
    /// `Settings::default()`. The file itself is left untouched.
    pub fn load_or_default(paths: &LedgerPaths) -> Self {
        Self::load_or_create(paths).unwrap_or_else(|e| {
            log::warn!("{}. Using default settings.", e);
            Settings::default()
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

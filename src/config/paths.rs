//! Path management for the expense tracker
//!
//! Every file the tracker touches is derived from the location of the store
//! file, `expenses.json` in the working directory unless overridden with
//! `--file`. Sidecar files share the store's file stem:
//!
//! | File                     | Purpose                          |
//! |--------------------------|----------------------------------|
//! | `expenses.json`          | the expense records              |
//! | `expenses.json.lock`     | advisory lock for writers        |
//! | `expenses.seq.json`      | id sequence high-water mark      |
//! | `expenses.audit.log`     | append-only audit log (JSONL)    |
//! | `expenses.config.json`   | optional user settings           |

use std::path::{Path, PathBuf};

use crate::error::ExpenseError;

/// Default store file name, resolved against the working directory
pub const DEFAULT_STORE_FILE: &str = "expenses.json";

/// Manages all paths used by the expense tracker
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    /// Path to the JSON store file
    store_file: PathBuf,
}

impl ExpensePaths {
    /// Create paths rooted at the given store file
    pub fn new(store_file: impl Into<PathBuf>) -> Self {
        Self {
            store_file: store_file.into(),
        }
    }

    /// Create paths for the default store file inside `dir`
    #[cfg(test)]
    pub(crate) fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_STORE_FILE))
    }

    /// Get the path to the store file
    pub fn store_file(&self) -> &Path {
        &self.store_file
    }

    /// Get the directory containing the store file
    pub fn base_dir(&self) -> PathBuf {
        match self.store_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Get the path to the lock file guarding the store
    pub fn lock_file(&self) -> PathBuf {
        let mut name = self
            .store_file
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_STORE_FILE.into());
        name.push(".lock");
        self.store_file.with_file_name(name)
    }

    /// Get the path to the id sequence file
    pub fn sequence_file(&self) -> PathBuf {
        self.sidecar("seq.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.sidecar("audit.log")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.sidecar("config.json")
    }

    /// Ensure the directory holding the store exists
    pub fn ensure_directories(&self) -> Result<(), ExpenseError> {
        std::fs::create_dir_all(self.base_dir())
            .map_err(|e| ExpenseError::Io(format!("Failed to create data directory: {}", e)))
    }

    fn sidecar(&self, suffix: &str) -> PathBuf {
        let stem = self
            .store_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "expenses".to_string());
        self.base_dir().join(format!("{}.{}", stem, suffix))
    }
}

impl Default for ExpensePaths {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_FILE)
    }
}

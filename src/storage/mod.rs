//! Storage layer for the expense tracker
//!
//! Provides JSON file storage with atomic writes, advisory file locking, and
//! the audit trail of every mutation.

pub mod expenses;
pub mod file_io;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic, FileLock};

use tracing::warn;

use crate::audit::{diff_expenses, AuditEntry, AuditLogger};
use crate::config::paths::ExpensePaths;
use crate::config::settings::Settings;
use crate::error::ExpenseError;
use crate::models::Expense;

/// Main storage coordinator that provides access to the repository and audit log
pub struct Storage {
    paths: ExpensePaths,
    pub expenses: ExpenseRepository,
    audit: Option<AuditLogger>,
    currency_symbol: String,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: ExpensePaths, settings: &Settings) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));

        Ok(Self {
            expenses: ExpenseRepository::new(&paths),
            audit,
            currency_symbol: settings.currency_symbol.clone(),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    /// The audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Record an added expense
    pub fn log_create(&self, expense: &Expense) {
        self.write_audit(AuditEntry::create(expense));
    }

    /// Record an updated expense
    pub fn log_update(&self, before: &Expense, after: &Expense) {
        let diff = diff_expenses(before, after, &self.currency_symbol);
        self.write_audit(AuditEntry::update(before, after, diff));
    }

    /// Record a deleted expense
    pub fn log_delete(&self, expense: &Expense) {
        self.write_audit(AuditEntry::delete(expense));
    }

    // Runs after the store write, so failures only warn.
    fn write_audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                warn!(path = %logger.path().display(), "failed to write audit entry: {}", e);
            }
        }
    }
}

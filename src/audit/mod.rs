//! Audit logging system for the expense tracker
//!
//! Records every add, update and delete with before/after snapshots in an
//! append-only log next to the store.
//!
//! - `AuditEntry`: one log line with timestamp, operation, expense id and
//!   optional before/after snapshots.
//! - `AuditLogger`: appends entries as line-delimited JSON (JSONL) and reads
//!   them back for `expense history`.
//! - `diff_expenses`: human-readable summary of the fields an update changed.

mod diff;
mod entry;
mod logger;

pub use diff::diff_expenses;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;

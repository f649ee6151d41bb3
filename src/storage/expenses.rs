//! Expense repository for JSON storage
//!
//! Every call reloads the store from disk; nothing is cached between calls.
//! Mutations hold an exclusive lock for the whole load-modify-save cycle and
//! rewrite the entire file atomically.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic, FileLock};

/// Persisted id high-water mark
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct SequenceData {
    next_id: ExpenseId,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    sequence_path: PathBuf,
    lock_path: PathBuf,
}

impl ExpenseRepository {
    /// Create a repository for the store described by `paths`
    pub fn new(paths: &ExpensePaths) -> Self {
        Self {
            path: paths.store_file().to_path_buf(),
            sequence_path: paths.sequence_file(),
            lock_path: paths.lock_file(),
        }
    }

    /// Append an expense, assigning it the next id
    ///
    /// The sequence file is advanced before the store is written, so a
    /// failed store write leaves at most an unused id.
    pub fn save(&self, mut expense: Expense) -> ExpenseResult<Expense> {
        let _lock = FileLock::exclusive(&self.lock_path)?;

        let mut expenses = self.load()?;
        let (id, following) = self.next_id(&expenses)?;
        expense.id = id;

        write_json_atomic(&self.sequence_path, &SequenceData { next_id: following })?;

        expenses.push(expense.clone());
        self.write_all(&expenses)?;

        debug!(id = %expense.id, count = expenses.len(), "saved expense");
        Ok(expense)
    }

    /// Apply `change` to the expense with the given id and persist the result
    ///
    /// The closure runs under the store lock, so validation done inside it
    /// sees the same record that gets written. The stored id is kept whatever
    /// the closure does. Returns the record before and after the change.
    /// Nothing is written if the closure fails.
    pub fn update<F>(&self, id: ExpenseId, change: F) -> ExpenseResult<(Expense, Expense)>
    where
        F: FnOnce(&mut Expense) -> ExpenseResult<()>,
    {
        let _lock = FileLock::exclusive(&self.lock_path)?;

        let mut expenses = self.load()?;
        let slot = expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        let before = slot.clone();
        change(slot)?;
        slot.id = id;
        let after = slot.clone();

        self.write_all(&expenses)?;
        debug!(id = %id, "updated expense");
        Ok((before, after))
    }

    /// Remove the expense with the given id, returning it
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        let _lock = FileLock::exclusive(&self.lock_path)?;

        let mut expenses = self.load()?;
        let position = expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        let removed = expenses.remove(position);
        self.write_all(&expenses)?;

        debug!(id = %id, remaining = expenses.len(), "deleted expense");
        Ok(removed)
    }

    /// Get all expenses in file order
    pub fn get_all(&self) -> ExpenseResult<Vec<Expense>> {
        let _lock = FileLock::shared(&self.lock_path)?;
        self.load()
    }

    /// Get an expense by id
    pub fn get_by_id(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        self.get_all()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))
    }

    fn load(&self) -> ExpenseResult<Vec<Expense>> {
        read_json(&self.path)
    }

    fn write_all(&self, expenses: &[Expense]) -> ExpenseResult<()> {
        write_json_atomic(&self.path, expenses)
    }

    /// The id for the next saved expense and the id after it
    ///
    /// The larger of the persisted sequence and the highest stored id plus one,
    /// so ids of deleted records are not handed out again.
    fn next_id(&self, expenses: &[Expense]) -> ExpenseResult<(ExpenseId, ExpenseId)> {
        let exhausted = || ExpenseError::Storage("Expense id space exhausted".into());

        let highest = expenses
            .iter()
            .map(|e| e.id)
            .max()
            .unwrap_or(ExpenseId::UNASSIGNED);
        let after_highest = highest.checked_next().ok_or_else(exhausted)?;

        let sequence = match read_json::<SequenceData, _>(&self.sequence_path) {
            Ok(seq) => seq.next_id,
            Err(e) => {
                warn!(path = %self.sequence_path.display(), "ignoring unreadable id sequence: {}", e);
                ExpenseId::UNASSIGNED
            }
        };

        let id = sequence.max(after_highest);
        let following = id.checked_next().ok_or_else(exhausted)?;
        Ok((id, following))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpensePaths, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::in_dir(temp_dir.path());
        let repo = ExpenseRepository::new(&paths);
        (temp_dir, paths, repo)
    }

    fn expense(description: &str, cents: i64) -> Expense {
        Expense::new(description, None, Money::from_cents(cents))
    }

    #[test]
    fn test_empty_store() {
        let (_temp_dir, paths, repo) = create_test_repo();
        assert!(repo.get_all().unwrap().is_empty());
        assert!(!paths.store_file().exists());
    }

    #[test]
    fn test_sequential_ids() {
        let (_temp_dir, _paths, repo) = create_test_repo();

        for i in 0..5 {
            let saved = repo.save(expense(&format!("item {}", i), 100)).unwrap();
            assert_eq!(saved.id, ExpenseId::new(i + 1));
        }

        let ids: Vec<ExpenseId> = repo.get_all().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=5).map(ExpenseId::new).collect::<Vec<_>>());
    }

    #[test]
    fn test_round_trip() {
        let (_temp_dir, paths, repo) = create_test_repo();

        let first = repo
            .save(Expense::new("lunch", Some("food".into()), Money::from_cents(1050)))
            .unwrap();
        let second = repo.save(expense("bus", 500)).unwrap();

        let reopened = ExpenseRepository::new(&paths);
        assert_eq!(reopened.get_all().unwrap(), vec![first, second]);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let (_temp_dir, _paths, repo) = create_test_repo();

        repo.save(expense("a", 100)).unwrap();
        repo.save(expense("b", 100)).unwrap();
        repo.save(expense("c", 100)).unwrap();

        repo.delete(ExpenseId::new(3)).unwrap();
        repo.delete(ExpenseId::new(1)).unwrap();

        let next = repo.save(expense("d", 100)).unwrap();
        assert_eq!(next.id, ExpenseId::new(4));
    }

    #[test]
    fn test_ids_unique_without_sequence_file() {
        let (_temp_dir, paths, repo) = create_test_repo();

        repo.save(expense("a", 100)).unwrap();
        repo.save(expense("b", 100)).unwrap();
        repo.delete(ExpenseId::new(1)).unwrap();
        std::fs::remove_file(paths.sequence_file()).unwrap();

        let next = repo.save(expense("c", 100)).unwrap();
        assert_eq!(next.id, ExpenseId::new(3));
    }

    #[test]
    fn test_corrupt_sequence_file_is_ignored() {
        let (_temp_dir, paths, repo) = create_test_repo();
        repo.save(expense("a", 100)).unwrap();
        std::fs::write(paths.sequence_file(), "garbage").unwrap();

        let next = repo.save(expense("b", 100)).unwrap();
        assert_eq!(next.id, ExpenseId::new(2));
    }

    #[test]
    fn test_get_by_id() {
        let (_temp_dir, _paths, repo) = create_test_repo();
        repo.save(expense("a", 100)).unwrap();
        repo.save(expense("b", 200)).unwrap();

        assert_eq!(repo.get_by_id(ExpenseId::new(2)).unwrap().description, "b");
        assert!(repo.get_by_id(ExpenseId::new(9)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_preserves_id() {
        let (_temp_dir, _paths, repo) = create_test_repo();
        repo.save(expense("a", 100)).unwrap();

        let mut replacement = expense("replaced", 999);
        replacement.id = ExpenseId::new(77);
        let (before, after) = repo
            .update(ExpenseId::new(1), |e| {
                *e = replacement;
                Ok(())
            })
            .unwrap();

        assert_eq!(before.description, "a");
        assert_eq!(after.id, ExpenseId::new(1));

        let stored = repo.get_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, ExpenseId::new(1));
        assert_eq!(stored[0].description, "replaced");
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (_temp_dir, _paths, repo) = create_test_repo();
        let err = repo.update(ExpenseId::new(1), |_| Ok(())).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_failure_writes_nothing() {
        let (_temp_dir, paths, repo) = create_test_repo();
        repo.save(expense("a", 100)).unwrap();
        let before = std::fs::read(paths.store_file()).unwrap();

        let err = repo
            .update(ExpenseId::new(1), |e| {
                e.description = "changed".into();
                Err(ExpenseError::Validation("nope".into()))
            })
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(std::fs::read(paths.store_file()).unwrap(), before);
    }

    #[test]
    fn test_failed_sequence_write_stores_nothing() {
        let (_temp_dir, paths, repo) = create_test_repo();
        repo.save(expense("a", 100)).unwrap();
        std::fs::remove_file(paths.sequence_file()).unwrap();
        std::fs::create_dir(paths.sequence_file()).unwrap();

        let err = repo.save(expense("b", 200)).unwrap_err();
        assert!(matches!(err, ExpenseError::Storage(_)));

        let stored = repo.get_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].description, "a");
    }

    #[test]
    fn test_exhausted_ids_fail_without_panicking() {
        let (_temp_dir, paths, repo) = create_test_repo();
        std::fs::write(
            paths.store_file(),
            r#"[{"id": 18446744073709551615, "date": "2024-01-05T09:15:00Z", "description": "last", "amount": 1}]"#,
        )
        .unwrap();

        let err = repo.save(expense("b", 100)).unwrap_err();
        assert!(err.to_string().contains("id space exhausted"));
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_exhausted_sequence_fails_without_panicking() {
        let (_temp_dir, paths, repo) = create_test_repo();
        std::fs::write(paths.sequence_file(), r#"{"next_id": 18446744073709551615}"#).unwrap();

        let err = repo.save(expense("a", 100)).unwrap_err();
        assert!(matches!(err, ExpenseError::Storage(_)));
        assert!(!paths.store_file().exists());
    }

    #[test]
    fn test_concurrent_saves_serialize() {
        const THREADS: usize = 4;
        const PER_THREAD: usize = 10;

        let (_temp_dir, paths, _repo) = create_test_repo();

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let paths = paths.clone();
                std::thread::spawn(move || {
                    let repo = ExpenseRepository::new(&paths);
                    for i in 0..PER_THREAD {
                        repo.save(expense(&format!("t{} #{}", t, i), 100)).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stored = ExpenseRepository::new(&paths).get_all().unwrap();
        assert_eq!(stored.len(), THREADS * PER_THREAD);

        let mut ids: Vec<ExpenseId> = stored.iter().map(|e| e.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids, (1..=(THREADS * PER_THREAD) as u64).map(ExpenseId::new).collect::<Vec<_>>());
    }

    #[test]
    fn test_delete_missing_leaves_file_unchanged() {
        let (_temp_dir, paths, repo) = create_test_repo();
        repo.save(expense("a", 100)).unwrap();
        let before = std::fs::read(paths.store_file()).unwrap();

        let err = repo.delete(ExpenseId::new(42)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(std::fs::read(paths.store_file()).unwrap(), before);
    }

    #[test]
    fn test_delete_keeps_order() {
        let (_temp_dir, _paths, repo) = create_test_repo();
        repo.save(expense("a", 100)).unwrap();
        repo.save(expense("b", 100)).unwrap();
        repo.save(expense("c", 100)).unwrap();

        let removed = repo.delete(ExpenseId::new(2)).unwrap();
        assert_eq!(removed.description, "b");

        let names: Vec<String> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|e| e.description)
            .collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_corrupt_store_is_reported() {
        let (_temp_dir, paths, repo) = create_test_repo();
        std::fs::write(paths.store_file(), "{ this is not an array").unwrap();

        assert!(matches!(repo.get_all(), Err(ExpenseError::Json(_))));
        assert!(matches!(repo.save(expense("a", 1)), Err(ExpenseError::Json(_))));
    }
}

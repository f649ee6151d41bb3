//! Expense service
//!
//! Provides business logic for expense management: input validation, update
//! merging and the total/monthly summaries.

use tracing::info;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId, Money};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Fields to change on an existing expense; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub description: Option<String>,
    /// `Some("")` clears the category
    pub category: Option<String>,
    pub amount: Option<Money>,
}

impl UpdateExpenseInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Check whether no field is being changed
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.category.is_none() && self.amount.is_none()
    }

    fn apply(self, expense: &mut Expense) {
        if let Some(description) = self.description {
            expense.description = description.trim().to_string();
        }
        if let Some(category) = self.category {
            expense.set_category(Some(category));
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
    }
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense dated now
    pub fn add_expense(
        &self,
        amount: Money,
        description: &str,
        category: Option<&str>,
    ) -> ExpenseResult<Expense> {
        let expense = Expense::new(
            description.trim(),
            category.map(str::to_string),
            amount,
        );

        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let saved = self.storage.expenses.save(expense)?;
        self.storage.log_create(&saved);

        info!(id = %saved.id, amount = %saved.amount, "added expense");
        Ok(saved)
    }

    /// Change the given fields of an existing expense
    ///
    /// The amount is validated the same way as on add. The recorded date is
    /// kept.
    pub fn update_expense(
        &self,
        id: ExpenseId,
        input: UpdateExpenseInput,
    ) -> ExpenseResult<Expense> {
        if input.is_empty() {
            return Err(ExpenseError::Validation(
                "Nothing to update: pass --description, --category or --amount".into(),
            ));
        }

        let (before, after) = self.storage.expenses.update(id, |expense| {
            input.apply(expense);
            expense
                .validate()
                .map_err(|e| ExpenseError::Validation(e.to_string()))
        })?;

        self.storage.log_update(&before, &after);

        info!(id = %id, "updated expense");
        Ok(after)
    }

    /// Delete an expense, returning the removed record
    pub fn delete_expense(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        // Surface not-found before touching the store
        self.storage.expenses.get_by_id(id)?;

        let removed = self.storage.expenses.delete(id)?;
        self.storage.log_delete(&removed);

        info!(id = %id, "deleted expense");
        Ok(removed)
    }

    /// List all expenses in insertion order
    pub fn list_expenses(&self) -> ExpenseResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// List expenses in a category (case-insensitive)
    pub fn list_by_category(&self, category: &str) -> ExpenseResult<Vec<Expense>> {
        Ok(self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .filter(|e| e.matches_category(category))
            .collect())
    }

    /// Sum of all expense amounts
    pub fn summary(&self) -> ExpenseResult<Money> {
        sum_amounts(&self.storage.expenses.get_all()?)
    }

    /// Sum of amounts recorded in calendar month `month` (1-12) of any year
    pub fn summary_by_month(&self, month: u32) -> ExpenseResult<Money> {
        validate_month(month)?;
        let expenses = self.storage.expenses.get_all()?;
        checked_total(expenses.iter().filter(|e| e.is_in_month(month)))
    }

    /// Sum of amounts recorded in calendar month `month` of `year`
    pub fn summary_by_month_in_year(&self, month: u32, year: i32) -> ExpenseResult<Money> {
        validate_month(month)?;
        let expenses = self.storage.expenses.get_all()?;
        checked_total(
            expenses
                .iter()
                .filter(|e| e.is_in_month_of_year(month, year)),
        )
    }
}

/// Total of the given expenses' amounts
///
/// Fails instead of wrapping when the total does not fit.
pub fn sum_amounts(expenses: &[Expense]) -> ExpenseResult<Money> {
    checked_total(expenses.iter())
}

fn checked_total<'e>(expenses: impl Iterator<Item = &'e Expense>) -> ExpenseResult<Money> {
    Money::checked_sum(expenses.map(|e| e.amount)).ok_or_else(|| {
        ExpenseError::Validation("Total of the selected expenses is too large to compute".into())
    })
}

fn validate_month(month: u32) -> ExpenseResult<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ExpenseError::Validation(format!(
            "Month must be between 1 and 12 (got {})",
            month
        )))
    }
}

//! Expense model
//!
//! A single recorded monetary outlay with date, description, category and amount.

use chrono::{DateTime, Datelike, FixedOffset, Local};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// A recorded expense
///
/// Capitalized keys are accepted on read so stores written by earlier
/// versions of the tracker still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Repository-assigned identifier
    #[serde(alias = "ID")]
    pub id: ExpenseId,

    /// When the expense was recorded, with the local UTC offset at that time
    #[serde(alias = "Date")]
    pub date: DateTime<FixedOffset>,

    #[serde(alias = "Description", default)]
    pub description: String,

    /// Optional category; never stored as an empty string
    #[serde(
        alias = "Category",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,

    #[serde(alias = "Amount")]
    pub amount: Money,
}

impl Expense {
    /// Create a new, unsaved expense stamped with the current local time
    pub fn new(description: impl Into<String>, category: Option<String>, amount: Money) -> Self {
        Self {
            id: ExpenseId::UNASSIGNED,
            date: Local::now().fixed_offset(),
            description: description.into(),
            category: normalize_category(category),
            amount,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.date = date;
        self
    }

    /// Replace the category, treating blank input as "uncategorized"
    pub fn set_category(&mut self, category: Option<String>) {
        self.category = normalize_category(category);
    }

    /// Category name for display
    pub fn category_name(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Check whether the expense belongs to a category (case-insensitive)
    pub fn matches_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(category.trim()))
    }

    /// Check whether the expense falls in the given calendar month of any year
    pub fn is_in_month(&self, month: u32) -> bool {
        self.date.month() == month
    }

    /// Check whether the expense falls in the given calendar month and year
    pub fn is_in_month_of_year(&self, month: u32, year: i32) -> bool {
        self.date.month() == month && self.date.year() == year
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > Money::MAX {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }
        Ok(())
    }
}

fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(normalize_category(value))
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} exceeds the maximum of {}", amount, Money::MAX)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

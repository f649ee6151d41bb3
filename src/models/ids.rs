//! Strongly-typed expense identifier
//!
//! Expense ids are small positive integers handed out by the repository.
//! Zero is reserved for "not yet assigned" and is never stored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a stored expense
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExpenseId(u64);

impl ExpenseId {
    /// The placeholder id carried by an expense before it is saved
    pub const UNASSIGNED: Self = Self(0);

    /// Create an id from its numeric value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The id following this one, or `None` once the id space is used up
    pub const fn checked_next(&self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassigned() {
        assert_eq!(ExpenseId::default(), ExpenseId::UNASSIGNED);
        assert_eq!(ExpenseId::UNASSIGNED.to_string(), "0");
    }

    #[test]
    fn test_checked_next() {
        assert_eq!(ExpenseId::new(4).checked_next(), Some(ExpenseId::new(5)));
        assert_eq!(ExpenseId::UNASSIGNED.checked_next(), Some(ExpenseId::new(1)));
        assert_eq!(ExpenseId::new(u64::MAX).checked_next(), None);
    }

    #[test]
    fn test_ordering() {
        assert!(ExpenseId::new(2) > ExpenseId::new(1));
    }

    #[test]
    fn test_serialization() {
        let id = ExpenseId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");

        let deserialized: ExpenseId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}

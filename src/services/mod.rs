//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, update merging and aggregation.

pub mod expense;

pub use expense::{sum_amounts, ExpenseService, UpdateExpenseInput};

//! Expense Tracker - personal expense tracking from the command line
//!
//! This library provides the core functionality behind the `expense` binary:
//! recording, editing, removing, listing and totalling personal expenses kept
//! in a single JSON file.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Store file paths and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, ids, money)
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `cli`: Command handlers for the binary
//! - `display`: Terminal output formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{ExpensePaths, Settings};
//! use expense_tracker::models::Money;
//! use expense_tracker::services::ExpenseService;
//! use expense_tracker::storage::Storage;
//!
//! let paths = ExpensePaths::new("expenses.json");
//! let settings = Settings::load_or_default(&paths)?;
//! let storage = Storage::new(paths, &settings)?;
//!
//! let service = ExpenseService::new(&storage);
//! let lunch = service.add_expense(Money::from_cents(1050), "lunch", Some("food"))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};

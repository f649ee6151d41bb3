//! Configuration module for the expense tracker
//!
//! This module provides configuration management including:
//! - Resolution of the store file and its sidecar files
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::Settings;

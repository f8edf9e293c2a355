//! Expense tracker - record, browse and analyze personal spending
//!
//! Expenses and category labels are kept as two JSON collections in a
//! key-value store. Everything the user sees (month-grouped listings,
//! per-category analytics, JSON/CSV exports) is derived from them on demand.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, identifiers, categories)
//! - `storage`: Key-value storage and the two repositories
//! - `reports`: Sorting, grouping, pagination and analytics
//! - `export`: JSON and CSV export
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `expenses` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::ExpensePaths;
//! use expense_tracker::models::ExpenseInput;
//! use expense_tracker::services::ExpenseService;
//! use expense_tracker::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let storage = Storage::new(&paths)?;
//! storage.load_all()?;
//!
//! let service = ExpenseService::new(&storage);
//! service.create(ExpenseInput::new(12.5, "Groceries", "", "2024-06-01"))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::ExpenseError;

//! Service layer for the expense tracker
//!
//! Services wrap the storage layer with validation, audit logging and the
//! derived views the CLI needs.

pub mod category;
pub mod expense;
pub mod import;

pub use category::CategoryService;
pub use expense::{ExpensePatch, ExpenseService};
pub use import::{ImportPreviewEntry, ImportResult, ImportService, ImportStatus};

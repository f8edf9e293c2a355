//! Core data models for the expense tracker
//!
//! Expenses, their identifiers, and category labels.

pub mod category;
pub mod expense;
pub mod ids;

pub use category::{default_categories, CategoryValidationError, DEFAULT_CATEGORIES};
pub use expense::{
    parse_date, parse_instant, Expense, ExpenseInput, ExpenseValidationError, DATE_FORMAT,
    DEFAULT_OWNER_ID,
};
pub use ids::ExpenseId;

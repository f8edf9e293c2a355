//! Expense model
//!
//! An expense is a single recorded spending transaction. The date is kept
//! as the text the user entered; records whose date does not parse stay in
//! storage but take no part in grouping or analytics.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::is_forbidden_label_char;
use super::ids::ExpenseId;

/// Owner identifier stamped on new expenses until accounts exist
pub const DEFAULT_OWNER_ID: &str = "user_placeholder_01";

/// Calendar date format used for storage and input
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier (creation time in milliseconds)
    pub id: ExpenseId,

    /// Amount spent (always positive)
    pub amount: f64,

    /// Category label; not required to exist in the registry
    pub category: String,

    /// Free-text notes
    #[serde(default)]
    pub details: String,

    /// ISO 8601 calendar date
    pub date: String,

    /// Owner identifier
    #[serde(default = "default_owner_id")]
    pub user_id: String,
}

fn default_owner_id() -> String {
    DEFAULT_OWNER_ID.to_string()
}

impl Expense {
    /// Build an expense from validated input
    pub fn new(id: ExpenseId, input: ExpenseInput, owner: impl Into<String>) -> Self {
        Self {
            id,
            amount: input.amount,
            category: input.category,
            details: input.details,
            date: input.date,
            user_id: owner.into(),
        }
    }

    /// Replace every field except the identifier and owner
    pub fn apply(&mut self, input: ExpenseInput) {
        self.amount = input.amount;
        self.category = input.category;
        self.details = input.details;
        self.date = input.date;
    }

    /// The calendar date, if the stored text parses
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// The point in time the date names, for ordering
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.date)
    }

    /// Month bucket label, e.g. "June 2024"
    pub fn month_label(&self) -> Option<String> {
        self.parsed_date().map(|d| d.format("%B %Y").to_string())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2} ({})", self.date, self.amount, self.category)
    }
}

/// Parse a stored date: `YYYY-MM-DD` or a full RFC 3339 timestamp
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Parse a stored date as an instant; a bare `YYYY-MM-DD` is midnight UTC
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

/// User-supplied fields for creating or updating an expense
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseInput {
    pub amount: f64,
    pub category: String,
    pub details: String,
    pub date: String,
}

impl ExpenseInput {
    pub fn new(
        amount: f64,
        category: impl Into<String>,
        details: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            details: details.into(),
            date: date.into(),
        }
    }

    /// Check required fields before anything is mutated
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.category.trim().is_empty() || self.date.trim().is_empty() {
            return Err(ExpenseValidationError::MissingField);
        }

        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }

        if self.category.chars().any(is_forbidden_label_char) {
            return Err(ExpenseValidationError::InvalidCategory(self.category.clone()));
        }

        if parse_date(&self.date).is_none() {
            return Err(ExpenseValidationError::InvalidDate(self.date.clone()));
        }

        Ok(())
    }
}

/// Validation errors for expense input
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseValidationError {
    MissingField,
    NonPositiveAmount,
    InvalidCategory(String),
    InvalidDate(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => write!(f, "Please fill in Amount, Category, and Date."),
            Self::NonPositiveAmount => write!(f, "Amount must be greater than zero."),
            Self::InvalidCategory(category) => write!(
                f,
                "Invalid category {:?}: quotes and line breaks are not allowed",
                category
            ),
            Self::InvalidDate(date) => write!(f, "Invalid date '{}', expected YYYY-MM-DD", date),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

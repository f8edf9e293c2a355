//! Expense service
//!
//! Create, edit and delete expenses with audit logging, plus the listing,
//! analytics and export views computed over the current collection.

use std::path::Path;

use crate::audit::AuditEntry;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{write_export, ExportArtifact, ExportFormat};
use crate::models::{Expense, ExpenseId, ExpenseInput, DEFAULT_OWNER_ID};
use crate::reports::{AnalyticsFilter, AnalyticsReport, DateRange, ListingPage};
use crate::storage::Storage;

/// Partial edit of an expense; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub details: Option<String>,
    pub date: Option<String>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.details.is_none()
            && self.date.is_none()
    }

    /// Full input with unspecified fields taken from `current`
    pub fn merge(self, current: &Expense) -> ExpenseInput {
        ExpenseInput {
            amount: self.amount.unwrap_or(current.amount),
            category: self.category.unwrap_or_else(|| current.category.clone()),
            details: self.details.unwrap_or_else(|| current.details.clone()),
            date: self.date.unwrap_or_else(|| current.date.clone()),
        }
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    owner: String,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            owner: DEFAULT_OWNER_ID.to_string(),
        }
    }

    /// Stamp new expenses with a different owner
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Record a new expense
    pub fn create(&self, input: ExpenseInput) -> ExpenseResult<Expense> {
        let expense = self.storage.expenses.create(input, &self.owner)?;

        self.storage.record(|| AuditEntry::expense_added(&expense));
        tracing::info!(id = %expense.id, category = %expense.category, "expense created");

        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Get an expense by ID, failing with `NotFound`
    pub fn require(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        self.get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))
    }

    /// Replace all editable fields
    pub fn update(&self, id: ExpenseId, input: ExpenseInput) -> ExpenseResult<Expense> {
        let before = self.require(id)?;
        let after = self.storage.expenses.update(id, input)?;

        self.storage.record(|| AuditEntry::expense_edited(&before, &after));
        tracing::info!(id = %id, "expense updated");

        Ok(after)
    }

    /// Change only the fields set in `patch`
    pub fn edit(&self, id: ExpenseId, patch: ExpensePatch) -> ExpenseResult<Expense> {
        let current = self.require(id)?;
        if patch.is_empty() {
            return Ok(current);
        }
        self.update(id, patch.merge(&current))
    }

    /// Delete an expense; returns false if it was not there
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<bool> {
        let Some(removed) = self.storage.expenses.remove(id)? else {
            return Ok(false);
        };

        self.storage.record(|| AuditEntry::expense_removed(&removed));
        tracing::info!(id = %id, "expense deleted");

        Ok(true)
    }

    /// All expenses in storage order
    pub fn list(&self) -> ExpenseResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        self.storage.expenses.count()
    }

    /// One page of the date-descending, month-grouped listing
    pub fn listing(&self, page: usize) -> ExpenseResult<ListingPage> {
        let expenses = self.list()?;
        Ok(ListingPage::build(&expenses, page))
    }

    /// Per-category totals for the filter
    pub fn analytics(&self, filter: &AnalyticsFilter) -> ExpenseResult<AnalyticsReport> {
        let expenses = self.list()?;
        Ok(AnalyticsReport::generate(&expenses, filter))
    }

    /// Write an export file for the range into `dir`
    pub fn export(
        &self,
        dir: &Path,
        format: ExportFormat,
        range: &DateRange,
        timestamp_ms: i64,
    ) -> ExpenseResult<ExportArtifact> {
        let expenses = self.list()?;
        let categories = self.storage.categories.list()?;
        write_export(dir, format, &expenses, &categories, range, timestamp_ms)
    }
}

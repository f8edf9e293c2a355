//! Category service
//!
//! Adds and removes category labels with validation and audit logging.
//! Removing a label never touches the expenses that use it.

use crate::audit::AuditEntry;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::category::normalize_label;
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All labels in registry order
    pub fn list(&self) -> ExpenseResult<Vec<String>> {
        self.storage.categories.list()
    }

    pub fn exists(&self, label: &str) -> ExpenseResult<bool> {
        self.storage.categories.contains(label)
    }

    /// Add a new label, returning it trimmed
    pub fn add(&self, label: &str) -> ExpenseResult<String> {
        let label = normalize_label(label).map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if !self.storage.categories.add(&label)? {
            return Err(ExpenseError::Duplicate {
                entity_type: "Category",
                identifier: label,
            });
        }

        self.storage.record(|| AuditEntry::category_added(&label));
        tracing::info!(category = %label, "category added");

        Ok(label)
    }

    /// Add a label unless it is already present; returns whether it was added
    pub fn ensure(&self, label: &str) -> ExpenseResult<bool> {
        match self.add(label) {
            Ok(_) => Ok(true),
            Err(ExpenseError::Duplicate { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Remove a label
    pub fn remove(&self, label: &str) -> ExpenseResult<()> {
        if !self.storage.categories.remove(label)? {
            return Err(ExpenseError::category_not_found(label));
        }

        self.storage.record(|| AuditEntry::category_removed(label));
        tracing::info!(category = %label, "category removed");

        Ok(())
    }

    /// Number of expenses recorded under `label`
    pub fn usage_count(&self, label: &str) -> ExpenseResult<usize> {
        Ok(self
            .storage
            .expenses
            .get_all()?
            .iter()
            .filter(|e| e.category == label)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseInput;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn create_test_storage() -> Storage {
        let storage = Storage::with_store(Arc::new(MemoryStore::new()));
        storage.load_all().unwrap();
        storage
    }

    #[test]
    fn test_defaults_listed() {
        let storage = create_test_storage();
        let service = CategoryService::new(&storage);

        let labels = service.list().unwrap();
        assert_eq!(labels.len(), 10);
        assert_eq!(labels[0], "Eating out");
    }

    #[test]
    fn test_add_trims_label() {
        let storage = create_test_storage();
        let service = CategoryService::new(&storage);

        assert_eq!(service.add("  Books ").unwrap(), "Books");
        assert!(service.exists("Books").unwrap());
    }

    #[test]
    fn test_add_rejects_empty_and_duplicate() {
        let storage = create_test_storage();
        let service = CategoryService::new(&storage);

        assert!(service.add("   ").unwrap_err().is_validation());
        assert!(matches!(
            service.add("Gas"),
            Err(ExpenseError::Duplicate { .. })
        ));
        assert!(!service.ensure("Gas").unwrap());
        assert!(service.ensure("Rent").unwrap());
        assert_eq!(service.list().unwrap().len(), 11);
    }

    #[test]
    fn test_remove_keeps_expenses() {
        let storage = create_test_storage();
        let service = CategoryService::new(&storage);
        storage
            .expenses
            .create(ExpenseInput::new(2.0, "Chocolate", "", "2024-06-01"), "u")
            .unwrap();

        assert_eq!(service.usage_count("Chocolate").unwrap(), 1);
        service.remove("Chocolate").unwrap();

        assert!(!service.exists("Chocolate").unwrap());
        assert_eq!(storage.expenses.get_all().unwrap()[0].category, "Chocolate");
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let storage = create_test_storage();
        let service = CategoryService::new(&storage);

        assert!(service.remove("Nope").unwrap_err().is_not_found());
    }
}

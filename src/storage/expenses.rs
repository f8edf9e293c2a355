//! Expense repository
//!
//! Keeps the `expenses` key mirrored in memory. Every mutation writes the
//! whole collection back before returning; if that write fails the
//! in-memory change is undone.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::error::ExpenseError;
use crate::models::{Expense, ExpenseId, ExpenseInput};

use super::store::KeyValueStore;
use super::{EXPENSES_KEY, QUARANTINE_KEY};

/// What happened while loading the collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Records accepted into the live collection
    pub loaded: usize,
    /// Records moved to the quarantine key
    pub quarantined: usize,
    /// The stored text was unreadable and an empty collection was used
    pub recovered: bool,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    store: Arc<dyn KeyValueStore>,
    data: RwLock<Vec<Expense>>,
}

impl ExpenseRepository {
    /// Create a new expense repository over a store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load expenses from the store
    ///
    /// Unparseable text falls back to an empty collection. Individual records
    /// that fail the schema are moved to the quarantine key.
    pub fn load(&self) -> Result<LoadOutcome, ExpenseError> {
        let mut outcome = LoadOutcome::default();

        let (accepted, rejected) = match self.store.get(EXPENSES_KEY)? {
            None => (Vec::new(), Vec::new()),
            Some(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Array(items)) => partition_records(items),
                Ok(_) | Err(_) => {
                    tracing::warn!("stored expenses are unreadable, starting from an empty list");
                    outcome.recovered = true;
                    (Vec::new(), vec![Value::String(text)])
                }
            },
        };

        outcome.loaded = accepted.len();
        outcome.quarantined = rejected.len();

        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = accepted;

        if !rejected.is_empty() {
            tracing::warn!(count = rejected.len(), "quarantining invalid expense records");
            self.quarantine(rejected)?;
            self.persist(&data)?;
        }

        Ok(outcome)
    }

    /// Save expenses to the store
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        self.persist(&data)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|e| e.id == id).cloned())
    }

    /// Get all expenses in storage order
    pub fn get_all(&self) -> Result<Vec<Expense>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }

    /// Validate, append and persist a new expense
    pub fn create(&self, input: ExpenseInput, owner: &str) -> Result<Expense, ExpenseError> {
        input
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let latest = data.iter().map(|e| e.id).max();
        let id = ExpenseId::next(latest).ok_or_else(|| {
            ExpenseError::Storage("No expense IDs left after the newest stored record".into())
        })?;
        let expense = Expense::new(id, input, owner);

        data.push(expense.clone());
        if let Err(e) = self.persist(&data) {
            data.pop();
            return Err(e);
        }

        Ok(expense)
    }

    /// Replace all fields except ID and owner
    pub fn update(&self, id: ExpenseId, input: ExpenseInput) -> Result<Expense, ExpenseError> {
        input
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let index = data
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        let before = data[index].clone();
        data[index].apply(input);
        let updated = data[index].clone();

        if let Err(e) = self.persist(&data) {
            data[index] = before;
            return Err(e);
        }

        Ok(updated)
    }

    /// Delete an expense, returning whether anything was removed
    pub fn delete(&self, id: ExpenseId) -> Result<bool, ExpenseError> {
        Ok(self.remove(id)?.is_some())
    }

    /// Delete an expense, returning the removed record
    pub fn remove(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let Some(index) = data.iter().position(|e| e.id == id) else {
            return Ok(None);
        };

        let removed = data.remove(index);
        if let Err(e) = self.persist(&data) {
            data.insert(index, removed);
            return Err(e);
        }

        Ok(Some(removed))
    }

    /// Append already-identified expenses (used by import)
    ///
    /// Records whose ID is already present are skipped. Returns the number
    /// of records added.
    pub fn insert_existing(&self, expenses: Vec<Expense>) -> Result<usize, ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let original_len = data.len();
        let mut seen: HashSet<ExpenseId> = data.iter().map(|e| e.id).collect();
        for expense in expenses {
            if seen.insert(expense.id) {
                data.push(expense);
            }
        }

        let added = data.len() - original_len;
        if added == 0 {
            return Ok(0);
        }

        if let Err(e) = self.persist(&data) {
            data.truncate(original_len);
            return Err(e);
        }

        Ok(added)
    }

    fn persist(&self, data: &[Expense]) -> Result<(), ExpenseError> {
        let text = serde_json::to_string(data)
            .map_err(|e| ExpenseError::Storage(format!("Failed to serialize expenses: {}", e)))?;
        self.store.set(EXPENSES_KEY, &text)
    }

    fn quarantine(&self, mut rejected: Vec<Value>) -> Result<(), ExpenseError> {
        let mut existing = match self.store.get(QUARANTINE_KEY)? {
            Some(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Array(items)) => items,
                _ => vec![Value::String(text)],
            },
            None => Vec::new(),
        };
        existing.append(&mut rejected);

        let text = serde_json::to_string_pretty(&existing)
            .map_err(|e| ExpenseError::Storage(format!("Failed to serialize quarantine: {}", e)))?;
        self.store.set(QUARANTINE_KEY, &text)
    }
}

/// Split raw records into schema-valid expenses and rejects
fn partition_records(items: Vec<Value>) -> (Vec<Expense>, Vec<Value>) {
    let mut accepted = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();
    let mut seen = HashSet::new();

    for item in items {
        match serde_json::from_value::<Expense>(item.clone()) {
            Ok(expense)
                if expense.amount.is_finite() && expense.amount > 0.0 && seen.insert(expense.id) =>
            {
                accepted.push(expense)
            }
            _ => rejected.push(item),
        }
    }

    (accepted, rejected)
}

//! Category registry
//!
//! Keeps the `categories` key mirrored in memory as an ordered list of
//! unique labels. The default set is seeded and persisted the first time
//! the key is found missing.

use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::error::ExpenseError;
use crate::models::default_categories;

use super::store::KeyValueStore;
use super::CATEGORIES_KEY;

/// Registry of category labels
pub struct CategoryRegistry {
    store: Arc<dyn KeyValueStore>,
    labels: RwLock<Vec<String>>,
}

impl CategoryRegistry {
    /// Create a new category registry over a store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            labels: RwLock::new(Vec::new()),
        }
    }

    /// Load labels from the store, seeding the defaults on first run
    pub fn load(&self) -> Result<(), ExpenseError> {
        let stored = match self.store.get(CATEGORIES_KEY)? {
            None => None,
            Some(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Null) => None,
                parsed => Some(parsed),
            },
        };

        let loaded = match stored {
            // Missing or null: seed the defaults and write them back
            None => {
                let defaults = default_categories();
                persist(self.store.as_ref(), &defaults)?;
                defaults
            }
            Some(Ok(Value::Array(items))) => clean_labels(items),
            Some(_) => {
                tracing::warn!("stored categories are unreadable, using the defaults");
                default_categories()
            }
        };

        let mut labels = self
            .labels
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *labels = loaded;

        Ok(())
    }

    /// Save labels to the store
    pub fn save(&self) -> Result<(), ExpenseError> {
        let labels = self
            .labels
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        persist(self.store.as_ref(), &labels)
    }

    /// All labels in registry order
    pub fn list(&self) -> Result<Vec<String>, ExpenseError> {
        let labels = self
            .labels
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(labels.clone())
    }

    pub fn contains(&self, label: &str) -> Result<bool, ExpenseError> {
        let labels = self
            .labels
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(labels.iter().any(|l| l == label))
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        let labels = self
            .labels
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(labels.len())
    }

    /// Add a label; empty or already-present labels are a no-op returning false
    pub fn add(&self, label: &str) -> Result<bool, ExpenseError> {
        let label = label.trim();
        if label.is_empty() {
            return Ok(false);
        }

        let mut labels = self
            .labels
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if labels.iter().any(|l| l == label) {
            return Ok(false);
        }

        labels.push(label.to_string());
        if let Err(e) = persist(self.store.as_ref(), &labels) {
            labels.pop();
            return Err(e);
        }

        Ok(true)
    }

    /// Remove a label; expenses using it are not touched
    pub fn remove(&self, label: &str) -> Result<bool, ExpenseError> {
        let mut labels = self
            .labels
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let Some(index) = labels.iter().position(|l| l == label) else {
            return Ok(false);
        };

        let removed = labels.remove(index);
        if let Err(e) = persist(self.store.as_ref(), &labels) {
            labels.insert(index, removed);
            return Err(e);
        }

        Ok(true)
    }
}

fn persist(store: &dyn KeyValueStore, labels: &[String]) -> Result<(), ExpenseError> {
    let text = serde_json::to_string(labels)
        .map_err(|e| ExpenseError::Storage(format!("Failed to serialize categories: {}", e)))?;
    store.set(CATEGORIES_KEY, &text)
}

/// Keep non-empty string labels, first occurrence wins
fn clean_labels(items: Vec<Value>) -> Vec<String> {
    let mut labels: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(label) if !label.trim().is_empty() && !labels.contains(&label) => {
                labels.push(label)
            }
            other => tracing::warn!(record = %other, "dropping invalid category record"),
        }
    }
    labels
}

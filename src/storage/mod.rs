//! Storage layer for the expense tracker
//!
//! Two JSON collections (expenses and category labels) live under fixed
//! keys of a [`KeyValueStore`]. The repositories mirror them in memory and
//! write back on every mutation.

pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod store;

use std::sync::Arc;

pub use categories::CategoryRegistry;
pub use expenses::{ExpenseRepository, LoadOutcome};
pub use init::initialize_storage;
pub use store::{FileStore, KeyValueStore, MemoryStore};

use crate::audit::{AuditEntry, AuditLog};
use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;

/// Key holding the expense array
pub const EXPENSES_KEY: &str = "expenses";

/// Key holding the category label array
pub const CATEGORIES_KEY: &str = "categories";

/// Key collecting expense records rejected on load
pub const QUARANTINE_KEY: &str = "expenses.quarantine";

/// Storage coordinator that owns the store and both repositories
pub struct Storage {
    store: Arc<dyn KeyValueStore>,
    audit: Option<AuditLog>,
    pub expenses: ExpenseRepository,
    pub categories: CategoryRegistry,
}

impl Storage {
    /// File-backed storage under the configured data directory, with audit logging
    pub fn new(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(paths.data_dir()));
        Ok(Self::with_store(store).with_audit_log(AuditLog::new(paths.audit_log())))
    }

    /// Storage over any store, without audit logging
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            expenses: ExpenseRepository::new(store.clone()),
            categories: CategoryRegistry::new(store.clone()),
            store,
            audit: None,
        }
    }

    pub fn with_audit_log(mut self, log: AuditLog) -> Self {
        self.audit = Some(log);
        self
    }

    pub fn without_audit(mut self) -> Self {
        self.audit = None;
        self
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn audit_log(&self) -> Option<&AuditLog> {
        self.audit.as_ref()
    }

    /// Load both collections
    pub fn load_all(&self) -> Result<LoadOutcome, ExpenseError> {
        let outcome = self.expenses.load()?;
        self.categories.load()?;
        Ok(outcome)
    }

    /// Save both collections
    pub fn save_all(&self) -> Result<(), ExpenseError> {
        self.expenses.save()?;
        self.categories.save()?;
        Ok(())
    }

    /// Append an audit record when logging is enabled
    ///
    /// The change is already persisted, so a failed append only warns.
    pub fn record(&self, entry: impl FnOnce() -> AuditEntry) {
        if let Some(log) = &self.audit {
            if let Err(e) = log.append(&entry()) {
                tracing::warn!(error = %e, "failed to write audit entry");
            }
        }
    }
}

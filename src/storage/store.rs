//! Key-value persistence backends
//!
//! Both collections are stored as JSON text under a fixed key. The
//! repositories only see the [`KeyValueStore`] trait, so the backing can be
//! a directory of files or an in-process map.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;

use super::file_io::{read_text, write_text_atomic};

/// Durable text storage addressed by key
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if it was never written
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError>;

    /// Replace the value under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError> {
        read_text(self.path_for(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        tracing::debug!(key, bytes = value.len(), "writing store key");
        write_text_atomic(self.path_for(key), value)
    }
}

/// In-process store, used for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key before handing the store to a repository
    pub fn with_entry(self, key: &str, value: impl Into<String>) -> Self {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value.into());
        }
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store whose writes can be switched to fail
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FlakyStore {
    inner: MemoryStore,
    fail_writes: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl FlakyStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_writes
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(ExpenseError::Storage(format!("write to '{}' refused", key)));
        }
        self.inner.set(key, value)
    }
}

//! The key-value abstraction behind the draft store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::{Result, StoreError};

/// Durable string key-value storage.
///
/// Implementations must survive reloads of the host application; the
/// in-memory one is the exception and is meant for tests.
pub trait DraftStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    /// Drop every key.
    fn clear(&self) -> Result<()>;
}

/// Store handle that can be shared between the host and a running wizard.
pub type SharedStore = Arc<dyn DraftStore + Send + Sync>;

impl<T: DraftStore + ?Sized> DraftStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

// Lets a `!Sync` store such as `Database` sit behind a `SharedStore`.
impl<T: DraftStore> DraftStore for Mutex<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.lock().map_err(|_| StoreError::Poisoned)?.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock().map_err(|_| StoreError::Poisoned)?.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock().map_err(|_| StoreError::Poisoned)?.remove(key)
    }

    fn clear(&self) -> Result<()> {
        self.lock().map_err(|_| StoreError::Poisoned)?.clear()
    }
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DraftStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.clear();
        Ok(())
    }
}

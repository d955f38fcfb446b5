use std::collections::BTreeMap;

use super::Storage;
use crate::error::StorageError;

/// In-process store. `unavailable()` simulates storage that cannot be reached.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    available: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            available: true,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            values: BTreeMap::new(),
            available: false,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

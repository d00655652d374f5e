//! In-memory record storage

use crate::domain::RecordStorage;
use crate::error::Result;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Record storage kept in process memory, for sessions that need no
/// durability and for tests that count writes
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RefCell<HashMap<String, String>>,
    quarantine: RefCell<HashMap<String, Vec<String>>>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one record
    pub fn with_record(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.records.borrow().get(key).cloned()
    }

    /// Every copy of `key` set aside so far, oldest first
    pub fn quarantined(&self, key: &str) -> Vec<String> {
        self.quarantine
            .borrow()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of writes since creation
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl RecordStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn quarantine(&self, key: &str, value: &str) -> Result<String> {
        self.records.borrow_mut().remove(key);
        let mut quarantine = self.quarantine.borrow_mut();
        let copies = quarantine.entry(key.to_string()).or_default();
        copies.push(value.to_string());
        Ok(format!("{}#{}", key, copies.len() - 1))
    }
}

// src/infrastructure/repositories/memory_store.rs
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::store::{KeyValueStore, Namespace};
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-local store; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<Namespace, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn read(&self, namespace: Namespace) -> DomainResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| DomainError::Storage(format!("Lock error: {}", e)))?;
        Ok(entries.get(&namespace).cloned())
    }

    fn write(&self, namespace: Namespace, value: &str) -> DomainResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| DomainError::Storage(format!("Lock error: {}", e)))?;
        entries.insert(namespace, value.to_string());
        Ok(())
    }
}

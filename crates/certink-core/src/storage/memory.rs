//! In-memory storage implementation.

use super::{BoxFuture, StorageError, StorageResult, TemplateRecord, TemplateStore};
use crate::element::Element;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, TemplateRecord>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, e.g. an unsaved placeholder from the backend.
    pub fn insert(&self, id: &str, record: TemplateRecord) -> StorageResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        records.insert(id.to_string(), record);
        Ok(())
    }
}

impl TemplateStore for MemoryStore {
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<TemplateRecord>> {
        let id = id.to_string();
        Box::pin(async move {
            let records = self
                .records
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            records.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn save(&self, id: &str, elements: &[Element]) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let record = TemplateRecord::saved(elements.to_vec());
        Box::pin(async move {
            let mut records = self
                .records
                .write()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            records.insert(id, record);
            Ok(())
        })
    }
}

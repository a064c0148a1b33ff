//! services/api/src/adapters/memory_store.rs
//!
//! An in-process `KeyValueStore`. Selected with `STORAGE_BACKEND=memory`; nothing
//! survives a restart.

use async_trait::async_trait;
use cloutline_core::ports::{KeyValueStore, PortResult};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> PortResult<()> {
        self.documents
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

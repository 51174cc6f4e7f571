//! In-memory key-value store. Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use glance_core::error::StoreError;
use glance_core::ports::KeyValueStore;

use super::{DEFAULT_QUOTA_BYTES, entry_size};

/// HashMap behind an async RwLock, with a total size quota.
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota,
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;

        let used: usize = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| entry_size(k, v))
            .sum();
        let needed = entry_size(key, value);
        let available = self.quota.saturating_sub(used);
        if needed > available {
            tracing::warn!(key, needed, available, "Store quota exceeded");
            return Err(StoreError::QuotaExceeded { needed, available });
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

use async_trait::async_trait;

use crate::error::StoreError;

/// Key-value store trait - abstraction over the local persistence backend.
///
/// Values are whole documents; there is no partial update.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value stored under `key`.
    ///
    /// Fails with [`StoreError::QuotaExceeded`] when the write would exceed
    /// the store's size budget; the previous value is then left in place.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key` from the store.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

//! File-backed key-value store: one file per key inside a data directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use glance_core::error::StoreError;
use glance_core::ports::KeyValueStore;

use super::{DEFAULT_QUOTA_BYTES, entry_size};

pub struct FileStore {
    dir: PathBuf,
    quota: usize,
    // Serializes writers so the quota check and the write are atomic.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (and create if needed) the store directory.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open_with_quota(dir, DEFAULT_QUOTA_BYTES).await
    }

    pub async fn open_with_quota(dir: impl Into<PathBuf>, quota: usize) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await.map_err(backend)?;
        tracing::debug!(dir = %dir.display(), quota, "File store opened");
        Ok(Self {
            dir,
            quota,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(file_name_for(key))
    }

    /// Sum of entry sizes of every key except `skip`.
    async fn used_except(&self, skip: &str) -> Result<usize, StoreError> {
        let skip = file_name_for(skip);
        let mut used = 0;
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(backend)?;
        while let Some(entry) = entries.next_entry().await.map_err(backend)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == skip || !name.ends_with(".json") {
                continue;
            }
            let len = entry.metadata().await.map_err(backend)?.len() as usize;
            // file name length approximates the key length
            used += name.len() - ".json".len() + len;
        }
        Ok(used)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(backend(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let needed = entry_size(key, value);
        let available = self.quota.saturating_sub(self.used_except(key).await?);
        if needed > available {
            tracing::warn!(key, needed, available, "Store quota exceeded");
            return Err(StoreError::QuotaExceeded { needed, available });
        }

        // Write-then-rename keeps the previous value on a failed write.
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, value).await.map_err(backend)?;
        tokio::fs::rename(&tmp, &path).await.map_err(backend)?;
        tracing::debug!(key, bytes = value.len(), "Stored");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(backend(e)),
        }
    }
}

fn backend(err: std::io::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// Keys map to file names; bytes outside `[A-Za-z0-9_-]` are percent-encoded.
fn file_name_for(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 5);
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
            name.push(b as char);
        } else {
            name.push_str(&format!("%{b:02X}"));
        }
    }
    name.push_str(".json");
    name
}

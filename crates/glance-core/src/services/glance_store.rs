//! Local persistence adapter for the glance list.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::Glance;
use crate::error::StoreError;
use crate::ports::KeyValueStore;
use crate::seed;

/// Well-known key holding the JSON array of glances.
pub const GLANCES_KEY: &str = "glances_data";

/// Where an unreadable document is copied before it is overwritten.
pub const GLANCES_BACKUP_KEY: &str = "glances_data.corrupt";

/// Reads and writes the whole glance list as one JSON document.
///
/// Records that fail to decode are skipped on load and written back
/// unchanged, after the readable ones, on every save.
#[derive(Clone)]
pub struct GlanceStore {
    store: Arc<dyn KeyValueStore>,
}

/// The stored array split into decoded glances and raw leftovers.
struct Stored {
    glances: Vec<Glance>,
    unreadable: Vec<Value>,
}

impl GlanceStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The underlying key-value store.
    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// The stored list, or the seed list when nothing has been stored.
    ///
    /// Fails with [`StoreError::Corrupt`] only when the document is not a
    /// JSON array; single bad records are skipped.
    pub async fn load(&self) -> Result<Vec<Glance>, StoreError> {
        match self.read().await? {
            Some(stored) => Ok(stored.glances),
            None => {
                tracing::debug!("No stored glances, using seed data");
                Ok(seed::glances())
            }
        }
    }

    /// Like [`GlanceStore::load`], but a corrupt document yields the seed list.
    pub async fn load_or_seed(&self) -> Result<Vec<Glance>, StoreError> {
        match self.load().await {
            Err(StoreError::Corrupt { key, reason }) => {
                tracing::warn!(key = %key, reason = %reason, "Stored glances unreadable, using seed data");
                Ok(seed::glances())
            }
            other => other,
        }
    }

    /// Overwrite the stored list, keeping any records that could not be decoded.
    ///
    /// A document that is not an array at all is copied to
    /// [`GLANCES_BACKUP_KEY`] first.
    pub async fn save(&self, glances: &[Glance]) -> Result<(), StoreError> {
        let mut records = glances
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;

        match self.read().await {
            Ok(Some(stored)) => records.extend(stored.unreadable),
            Ok(None) => {}
            Err(StoreError::Corrupt { .. }) => self.back_up().await?,
            Err(e) => return Err(e),
        }

        let raw = serde_json::to_string(&records)?;
        self.store.set(GLANCES_KEY, &raw).await?;
        tracing::debug!(count = glances.len(), bytes = raw.len(), "Glances saved");
        Ok(())
    }

    /// Read-modify-write: put `glance` at index 0 and save.
    ///
    /// Starts from the seed list when the stored document is corrupt, which
    /// is what the feed shows in that case.
    pub async fn prepend(&self, glance: Glance) -> Result<Vec<Glance>, StoreError> {
        let mut glances = self.load_or_seed().await?;
        glances.insert(0, glance);
        self.save(&glances).await?;
        Ok(glances)
    }

    async fn read(&self) -> Result<Option<Stored>, StoreError> {
        let Some(raw) = self.store.get(GLANCES_KEY).await? else {
            return Ok(None);
        };

        let values: Vec<Value> = serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            key: GLANCES_KEY.to_string(),
            reason: e.to_string(),
        })?;

        let mut stored = Stored {
            glances: Vec::with_capacity(values.len()),
            unreadable: Vec::new(),
        };
        for (index, value) in values.into_iter().enumerate() {
            match Glance::deserialize(&value) {
                Ok(glance) => stored.glances.push(glance),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping unreadable stored glance");
                    stored.unreadable.push(value);
                }
            }
        }
        Ok(Some(stored))
    }

    async fn back_up(&self) -> Result<(), StoreError> {
        if let Some(raw) = self.store.get(GLANCES_KEY).await? {
            self.store.set(GLANCES_BACKUP_KEY, &raw).await?;
            tracing::warn!(key = GLANCES_BACKUP_KEY, "Corrupt glances document backed up");
        }
        Ok(())
    }
}

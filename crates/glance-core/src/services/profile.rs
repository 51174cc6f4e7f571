//! Profile editing with locally stored overrides.
//!
//! Display names live with the identity provider; the bio and avatar image
//! are kept in the local store under per-user keys.

use std::sync::Arc;

use crate::domain::{MediaFile, MediaKind};
use crate::error::{DomainError, StoreError};
use crate::ports::{Identity, IdentityProvider, KeyValueStore};

const MIN_NAME_CHARS: usize = 2;
const MAX_NAME_CHARS: usize = 50;
const MAX_BIO_CHARS: usize = 160;

pub fn bio_key(uid: &str) -> String {
    format!("bio_{uid}")
}

pub fn photo_key(uid: &str) -> String {
    format!("photoURL_{uid}")
}

#[derive(Clone)]
pub struct Profiles {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn KeyValueStore>,
}

impl Profiles {
    pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { provider, store }
    }

    pub async fn bio(&self, uid: &str) -> Result<Option<String>, StoreError> {
        self.store.get(&bio_key(uid)).await
    }

    pub async fn avatar(&self, uid: &str) -> Result<Option<String>, StoreError> {
        self.store.get(&photo_key(uid)).await
    }

    /// Update the display name and bio. An empty bio removes the override.
    pub async fn update_profile(
        &self,
        display_name: &str,
        bio: &str,
    ) -> Result<Identity, DomainError> {
        let display_name = display_name.trim();
        let name_len = display_name.chars().count();
        if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&name_len) {
            return Err(DomainError::Validation(format!(
                "Name must be between {MIN_NAME_CHARS} and {MAX_NAME_CHARS} characters"
            )));
        }
        if bio.chars().count() > MAX_BIO_CHARS {
            return Err(DomainError::Validation(format!(
                "Bio cannot exceed {MAX_BIO_CHARS} characters"
            )));
        }

        self.provider.current().ok_or(DomainError::Unauthenticated)?;
        let identity = self.provider.update_display_name(display_name).await?;

        let key = bio_key(&identity.uid);
        if bio.is_empty() {
            self.store.remove(&key).await?;
        } else {
            self.store.set(&key, bio).await?;
        }

        tracing::info!(uid = %identity.uid, "Profile updated");
        Ok(identity)
    }

    /// Store an avatar image as a data URI override.
    pub async fn update_avatar(&self, image: &MediaFile) -> Result<(), DomainError> {
        if image.kind() != Some(MediaKind::Image) {
            return Err(DomainError::Validation("Avatar must be an image".to_string()));
        }

        let identity = self.provider.current().ok_or(DomainError::Unauthenticated)?;
        self.store
            .set(&photo_key(&identity.uid), &image.to_data_uri())
            .await?;

        tracing::info!(uid = %identity.uid, bytes = image.bytes.len(), "Avatar updated");
        Ok(())
    }
}

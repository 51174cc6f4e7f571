//! One-time AI-curated seed for a new user's feed.

use std::sync::Arc;

use crate::domain::{Glance, GlanceMedia, User};
use crate::error::{DomainError, StoreError};
use crate::ports::{FeedPromptGenerator, KeyValueStore};
use crate::services::GlanceStore;

pub const MIN_INTERESTS_CHARS: usize = 10;

/// Author of AI-curated glances.
pub fn curator() -> User {
    User::new(
        "glance-ai",
        "Glance AI",
        "glance",
        "https://picsum.photos/seed/glance-ai/100/100",
    )
    .with_bio("Curating your first glances.")
}

fn onboarded_key(uid: &str) -> String {
    format!("onboarded_{uid}")
}

pub struct Onboarding {
    generator: Arc<dyn FeedPromptGenerator>,
    store: GlanceStore,
}

impl Onboarding {
    pub fn new(generator: Arc<dyn FeedPromptGenerator>, store: GlanceStore) -> Self {
        Self { generator, store }
    }

    /// Ask the AI collaborator for glance texts matching `interests`.
    pub async fn generate(&self, interests: &str) -> Result<Vec<String>, DomainError> {
        let interests = interests.trim();
        if interests.chars().count() < MIN_INTERESTS_CHARS {
            return Err(DomainError::Validation(
                "Please describe your interests in a bit more detail".to_string(),
            ));
        }

        let glances = self.generator.generate(interests).await?;
        tracing::info!(count = glances.len(), "Personalized feed generated");
        Ok(glances)
    }

    pub async fn is_onboarded(&self, uid: &str) -> Result<bool, StoreError> {
        Ok(self.store.backend().get(&onboarded_key(uid)).await?.is_some())
    }

    /// Generate and persist curated glances for `user`, once.
    ///
    /// Returns the glances added; empty when the user was already onboarded.
    pub async fn seed_feed(&self, user: &User, interests: &str) -> Result<Vec<Glance>, DomainError> {
        if self.is_onboarded(&user.id).await? {
            tracing::debug!(uid = %user.id, "User already onboarded");
            return Ok(Vec::new());
        }

        let texts = self.generate(interests).await?;
        let curator = curator();
        let added: Vec<Glance> = texts
            .into_iter()
            .filter(|text| !text.trim().is_empty())
            .enumerate()
            .map(|(index, text)| {
                let mut glance = Glance::new(curator.clone(), text.trim().to_string(), GlanceMedia::Text);
                glance.id = format!("{}-{}", glance.id, index);
                glance
            })
            .collect();

        let mut glances = self.store.load_or_seed().await?;
        glances.splice(0..0, added.iter().cloned());
        self.store.save(&glances).await?;
        self.store.backend().set(&onboarded_key(&user.id), "true").await?;

        Ok(added)
    }
}

//! Wiring of the adapters behind the core services.

use std::sync::Arc;

use anyhow::Context;

use glance_core::ports::{
    AudioCapture, FeedPromptGenerator, HashtagSuggester, IdentityProvider, KeyValueStore,
    MediaUploader,
};
use glance_core::services::{Feed, GlanceStore, Onboarding, Profiles, Session};
use glance_infra::{FileStore, GeminiClient, HttpUploader, LocalIdentityProvider, ProcessAudioCapture};

use crate::config::ClientConfig;

pub struct AppState {
    pub glances: GlanceStore,
    pub session: Session,
    pub profiles: Profiles,
    pub onboarding: Onboarding,
    pub uploader: Arc<dyn MediaUploader>,
    pub suggester: Arc<dyn HashtagSuggester>,
    pub capture: Arc<dyn AudioCapture>,
}

impl AppState {
    pub async fn build(config: &ClientConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(
            FileStore::open_with_quota(&config.data_dir, config.store_quota_bytes)
                .await
                .with_context(|| format!("opening data directory {}", config.data_dir.display()))?,
        );
        let identity: Arc<dyn IdentityProvider> = Arc::new(
            LocalIdentityProvider::restore(store.clone(), config.session.clone())
                .await
                .context("restoring session")?,
        );

        let gemini = Arc::new(GeminiClient::new(config.gemini.clone()));
        if config.gemini.api_key.is_none() {
            tracing::info!("GEMINI_API_KEY not set. AI features are disabled.");
        }
        let generator: Arc<dyn FeedPromptGenerator> = gemini.clone();
        let glances = GlanceStore::new(store.clone());

        let mut session = Session::new(identity.clone(), store.clone());
        session.attach();

        tracing::debug!(data_dir = %config.data_dir.display(), "Application state initialized");

        Ok(Self {
            onboarding: Onboarding::new(generator, glances.clone()),
            profiles: Profiles::new(identity, store),
            session,
            glances,
            uploader: Arc::new(HttpUploader::new(config.upload.clone())),
            suggester: gemini,
            capture: Arc::new(ProcessAudioCapture::new(config.capture.clone())),
        })
    }

    /// A freshly activated feed.
    pub async fn feed(&self) -> Result<Feed, glance_core::error::StoreError> {
        let mut feed = Feed::new(self.glances.clone());
        feed.activate().await?;
        Ok(feed)
    }
}

//! Application state - shared across all handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::MediaStorage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<MediaStorage>,
    pub public_base_url: String,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            storage: Arc::new(MediaStorage::new(config.media_dir.clone())),
            public_base_url: config.public_base_url.clone(),
        }
    }

    /// Public URL of a stored file.
    pub fn media_url(&self, name: &str) -> String {
        format!("{}/media/{}", self.public_base_url, name)
    }
}

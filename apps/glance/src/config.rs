//! Client configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use glance_infra::store::DEFAULT_QUOTA_BYTES;
use glance_infra::{CaptureConfig, GeminiConfig, SessionConfig, UploadConfig};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub store_quota_bytes: usize,
    pub upload: UploadConfig,
    pub gemini: GeminiConfig,
    pub session: SessionConfig,
    pub capture: CaptureConfig,
    pub json_logs: bool,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("GLANCE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".glance")),
            store_quota_bytes: env::var("GLANCE_STORE_QUOTA_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_QUOTA_BYTES),
            upload: UploadConfig::from_env(),
            gemini: GeminiConfig::from_env(),
            session: SessionConfig::from_env(),
            capture: CaptureConfig::from_env(),
            json_logs: env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
        }
    }
}

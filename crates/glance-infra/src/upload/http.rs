//! Uploads media as a data URI to an HTTP endpoint.

use async_trait::async_trait;
use reqwest::Client;

use glance_core::domain::{MediaFile, MediaKind};
use glance_core::ports::{MediaUploader, UploadError, UploadedMedia};
use glance_shared::{UploadErrorBody, UploadRequest, UploadResponse};

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub endpoint: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080/api/upload".to_string(),
        }
    }
}

impl UploadConfig {
    /// Reads `GLANCE_UPLOAD_URL`.
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("GLANCE_UPLOAD_URL").unwrap_or_else(|_| Self::default().endpoint),
        }
    }
}

#[derive(Clone)]
pub struct HttpUploader {
    http: Client,
    config: UploadConfig,
}

impl HttpUploader {
    pub fn new(config: UploadConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl MediaUploader for HttpUploader {
    async fn upload(&self, file: &MediaFile) -> Result<UploadedMedia, UploadError> {
        tracing::debug!(
            endpoint = %self.config.endpoint,
            file = %file.file_name,
            bytes = file.bytes.len(),
            "Uploading media"
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&UploadRequest {
                file: file.to_data_uri(),
            })
            .send()
            .await
            .map_err(|e| UploadError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<UploadErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("Upload failed with status {status}"),
            };
            tracing::warn!(%status, error = %message, "Upload rejected");
            return Err(UploadError::Rejected(message));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| UploadError::InvalidResponse(e.to_string()))?;
        if body.secure_url.is_empty() {
            return Err(UploadError::InvalidResponse("missing secure_url".to_string()));
        }

        let kind = resolve_kind(&body.resource_type, file.kind())?;
        tracing::info!(url = %body.secure_url, %kind, "Media uploaded");
        Ok(UploadedMedia {
            url: body.secure_url,
            kind,
        })
    }
}

/// Map the service's resource type to a media kind. Hosts file audio under
/// `video`, so an audio payload reported as video stays audio.
fn resolve_kind(resource_type: &str, sent: Option<MediaKind>) -> Result<MediaKind, UploadError> {
    match resource_type {
        "image" => Ok(MediaKind::Image),
        "audio" => Ok(MediaKind::Audio),
        "video" if sent == Some(MediaKind::Audio) => Ok(MediaKind::Audio),
        "video" => Ok(MediaKind::Video),
        other => Err(UploadError::InvalidResponse(format!(
            "unknown resource_type {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_types_map_to_kinds() {
        assert_eq!(resolve_kind("image", Some(MediaKind::Image)).unwrap(), MediaKind::Image);
        assert_eq!(resolve_kind("video", Some(MediaKind::Video)).unwrap(), MediaKind::Video);
        assert_eq!(resolve_kind("audio", Some(MediaKind::Audio)).unwrap(), MediaKind::Audio);
    }

    #[test]
    fn test_audio_filed_as_video_stays_audio() {
        assert_eq!(resolve_kind("video", Some(MediaKind::Audio)).unwrap(), MediaKind::Audio);
    }

    #[test]
    fn test_unknown_resource_type_rejected() {
        assert!(matches!(
            resolve_kind("raw", Some(MediaKind::Image)),
            Err(UploadError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        let uploader = HttpUploader::new(UploadConfig {
            endpoint: "http://127.0.0.1:1/api/upload".to_string(),
        });
        let file = MediaFile::new("a.png", "image/png", vec![1, 2, 3]);

        let result = uploader.upload(&file).await;
        assert!(matches!(result, Err(UploadError::Connection(_))));
    }
}

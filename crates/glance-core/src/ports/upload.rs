use async_trait::async_trait;

use crate::domain::{MediaFile, MediaKind};

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub url: String,
    pub kind: MediaKind,
}

/// Media upload trait - abstraction over the media hosting endpoint.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Upload a file and return its remote location.
    async fn upload(&self, file: &MediaFile) -> Result<UploadedMedia, UploadError>;
}

/// Upload errors. The message is shown to the user as-is.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{0}")]
    Rejected(String),

    #[error("Could not reach the upload service: {0}")]
    Connection(String),

    #[error("Upload service returned an invalid result: {0}")]
    InvalidResponse(String),
}

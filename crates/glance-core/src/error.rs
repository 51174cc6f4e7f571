//! Domain-level error types and user-facing notices.

use thiserror::Error;

use crate::ports::{AiError, AuthError, CaptureError, UploadError};

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("You need to be signed in to do that")]
    Unauthenticated,

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// Key-value store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage quota exceeded: {needed} bytes needed, {available} available")]
    QuotaExceeded { needed: usize, available: usize },

    #[error("Stored document under {key} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Storage backend failed: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

impl From<&StoreError> for Notice {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::QuotaExceeded { .. } => Notice::error(
                "Local storage full",
                "Could not save, local storage is full. Try clearing old posts.",
            ),
            other => Notice::error("Could not save", other.to_string()),
        }
    }
}

impl From<&DomainError> for Notice {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Storage(e) => e.into(),
            DomainError::Validation(msg) => Notice::error("Invalid input", msg.clone()),
            DomainError::NotFound { .. } => Notice::error("Not found", err.to_string()),
            DomainError::Unauthenticated => Notice::error("Error", err.to_string()),
            DomainError::Auth(e) => Notice::error("Authentication failed", e.to_string()),
            DomainError::Upload(e) => Notice::error("Upload error", e.to_string()),
            DomainError::Ai(e) => Notice::error("AI suggestion failed", e.to_string()),
            DomainError::Capture(e) => Notice::error("Recording failed", e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_notice_is_specific() {
        let err = DomainError::Storage(StoreError::QuotaExceeded {
            needed: 10,
            available: 2,
        });
        let notice = Notice::from(&err);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.title, "Local storage full");
    }

    #[test]
    fn test_upload_notice_carries_collaborator_message() {
        let err = DomainError::Upload(UploadError::Rejected("file too large".to_string()));
        let notice = Notice::from(&err);
        assert!(notice.description.contains("file too large"));
    }
}

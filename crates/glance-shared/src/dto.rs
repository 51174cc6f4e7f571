//! Request/response bodies of the media upload endpoint.

use serde::{Deserialize, Serialize};

/// `POST /api/upload` body. `file` is a `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    pub file: String,
}

/// Successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub secure_url: String,
    /// `image`, `video` or `audio`.
    pub resource_type: String,
}

/// Failure body. Every error response of the upload server carries at least this field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_uses_snake_case_fields() {
        let body = serde_json::to_value(UploadResponse {
            secure_url: "http://localhost/media/a.png".to_string(),
            resource_type: "image".to_string(),
        })
        .unwrap();

        assert_eq!(body["secure_url"], "http://localhost/media/a.png");
        assert_eq!(body["resource_type"], "image");
    }
}

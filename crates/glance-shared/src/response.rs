//! Error bodies (RFC 7807 problem details).

use serde::{Deserialize, Serialize};

/// RFC 7807 Problem Details, extended with an `error` member so that
/// clients reading only `{error}` still get the message.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,

    pub title: String,

    pub status: u16,

    /// Human-readable explanation of this occurrence.
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            error: error.into(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(400, "Bad Request", error)
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(404, "Not Found", error)
    }

    pub fn payload_too_large(error: impl Into<String>) -> Self {
        Self::new(413, "Payload Too Large", error)
    }

    pub fn internal_error(error: impl Into<String>) -> Self {
        Self::new(500, "Internal Server Error", error)
    }
}

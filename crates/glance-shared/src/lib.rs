//! # Glance Shared
//!
//! Wire types shared by the upload client and the upload server.

pub mod dto;
pub mod response;

pub use dto::{UploadErrorBody, UploadRequest, UploadResponse};
pub use response::ErrorResponse;

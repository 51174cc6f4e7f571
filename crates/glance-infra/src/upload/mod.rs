//! Media upload client.

mod http;

pub use http::{HttpUploader, UploadConfig};

//! # Glance Infrastructure
//!
//! Concrete implementations of the ports defined in `glance-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - Key-value stores and audio capture only
//! - `auth` - Local identity provider (Argon2 + JWT session)
//! - `http` - Upload client and Gemini client via reqwest

pub mod capture;
pub mod store;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "http")]
pub mod ai;

#[cfg(feature = "http")]
pub mod upload;

pub use capture::{CaptureConfig, ProcessAudioCapture};
pub use store::{FileStore, InMemoryStore};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtSessionService, LocalIdentityProvider, SessionConfig};

#[cfg(feature = "http")]
pub use ai::{GeminiClient, GeminiConfig};

#[cfg(feature = "http")]
pub use upload::{HttpUploader, UploadConfig};

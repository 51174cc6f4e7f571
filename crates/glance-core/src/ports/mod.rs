//! Ports - trait definitions for external collaborators.
//! These are the "interfaces" that infrastructure must implement.

mod ai;
mod capture;
mod identity;
mod store;
mod upload;

pub use ai::{AiError, FeedPromptGenerator, HashtagSuggester};
pub use capture::{AudioCapture, CaptureError};
pub use identity::{AuthError, Identity, IdentityListener, IdentityProvider, SubscriptionId};
pub use store::KeyValueStore;
pub use upload::{MediaUploader, UploadError, UploadedMedia};

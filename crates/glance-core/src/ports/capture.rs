//! Audio capture port.

use async_trait::async_trait;

use crate::domain::Recording;

/// Audio capture trait - drives a microphone recording.
#[async_trait]
pub trait AudioCapture: Send + Sync {
    /// Start recording. Fails when the microphone is unavailable.
    async fn start(&self) -> Result<(), CaptureError>;

    /// Stop recording and return the captured audio.
    async fn stop(&self) -> Result<Recording, CaptureError>;

    /// Release whatever backs a take that will not be used again.
    async fn discard(&self, _recording: &Recording) {}
}

/// Capture errors.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Microphone access is unavailable: {0}")]
    Unavailable(String),

    #[error("Not recording")]
    NotRecording,

    #[error("Already recording")]
    AlreadyRecording,

    #[error("Recording failed: {0}")]
    Io(String),
}

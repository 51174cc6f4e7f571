//! Record/stop/review cycle for audio glances.

use crate::domain::Recording;
use crate::error::DomainError;
use crate::ports::{AudioCapture, CaptureError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording,
    Stopped(Recording),
}

#[derive(Debug, Default)]
pub struct Recorder {
    state: RecorderState,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RecorderState {
        &self.state
    }

    /// Start (or restart, discarding the previous take) a recording.
    pub async fn start(&mut self, capture: &dyn AudioCapture) -> Result<(), DomainError> {
        if self.state == RecorderState::Recording {
            return Err(CaptureError::AlreadyRecording.into());
        }

        self.discard(capture).await;
        capture.start().await?;
        self.state = RecorderState::Recording;
        tracing::debug!("Recording started");
        Ok(())
    }

    pub async fn stop(&mut self, capture: &dyn AudioCapture) -> Result<&Recording, DomainError> {
        if self.state != RecorderState::Recording {
            return Err(CaptureError::NotRecording.into());
        }

        match capture.stop().await {
            Ok(recording) => {
                tracing::debug!(bytes = recording.bytes.len(), "Recording stopped");
                self.state = RecorderState::Stopped(recording);
            }
            Err(e) => {
                self.state = RecorderState::Idle;
                return Err(e.into());
            }
        }

        match &self.state {
            RecorderState::Stopped(recording) => Ok(recording),
            _ => Err(CaptureError::NotRecording.into()),
        }
    }

    /// Release the finished take, if any, and go back to idle.
    pub async fn discard(&mut self, capture: &dyn AudioCapture) {
        if !matches!(self.state, RecorderState::Stopped(_)) {
            return;
        }
        if let RecorderState::Stopped(recording) = std::mem::take(&mut self.state) {
            capture.discard(&recording).await;
            tracing::debug!("Recording discarded");
        }
    }

    /// The finished take, if any.
    pub fn recording(&self) -> Option<&Recording> {
        match &self.state {
            RecorderState::Stopped(recording) => Some(recording),
            _ => None,
        }
    }
}

//! Runs a recorder command that writes audio to a file until it is stopped.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;

use glance_core::domain::{Recording, mime_for_extension};
use glance_core::ports::{AudioCapture, CaptureError};

#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Program and arguments; the output file path is appended.
    pub command: Vec<String>,
    /// Extension of the produced file, used to derive its MIME type.
    pub extension: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            command: ["arecord", "-q", "-f", "cd", "-t", "wav"]
                .into_iter()
                .map(String::from)
                .collect(),
            extension: "wav".to_string(),
        }
    }
}

impl CaptureConfig {
    /// Reads `GLANCE_RECORD_COMMAND` (whitespace separated) and
    /// `GLANCE_RECORD_EXTENSION`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let command = std::env::var("GLANCE_RECORD_COMMAND")
            .ok()
            .map(|c| c.split_whitespace().map(String::from).collect::<Vec<_>>())
            .filter(|c| !c.is_empty())
            .unwrap_or(defaults.command);

        Self {
            command,
            extension: std::env::var("GLANCE_RECORD_EXTENSION").unwrap_or(defaults.extension),
        }
    }
}

const FILE_PREFIX: &str = "glance_recording_";

struct ActiveRecording {
    child: Child,
    path: PathBuf,
}

pub struct ProcessAudioCapture {
    config: CaptureConfig,
    active: Mutex<Option<ActiveRecording>>,
}

impl ProcessAudioCapture {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            active: Mutex::new(None),
        }
    }
}

#[async_trait]
impl AudioCapture for ProcessAudioCapture {
    async fn start(&self) -> Result<(), CaptureError> {
        let mut active = self.active.lock().await;
        if active.is_some() {
            return Err(CaptureError::AlreadyRecording);
        }

        let (program, args) = self
            .config
            .command
            .split_first()
            .ok_or_else(|| CaptureError::Unavailable("no recorder command configured".to_string()))?;
        let path = std::env::temp_dir().join(format!(
            "{FILE_PREFIX}{}.{}",
            uuid::Uuid::new_v4(),
            self.config.extension
        ));

        let child = Command::new(program)
            .args(args)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CaptureError::Unavailable(format!("{program}: {e}")))?;

        tracing::debug!(recorder = %program, path = %path.display(), "Recording started");
        *active = Some(ActiveRecording { child, path });
        Ok(())
    }

    async fn stop(&self) -> Result<Recording, CaptureError> {
        let ActiveRecording { mut child, path } = self
            .active
            .lock()
            .await
            .take()
            .ok_or(CaptureError::NotRecording)?;

        // The recorder's output file stays readable after a kill.
        if let Err(e) = child.kill().await {
            tracing::warn!(error = %e, "Recorder did not stop cleanly");
        }

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| CaptureError::Io(e.to_string()))?;
        if bytes.is_empty() {
            let _ = tokio::fs::remove_file(&path).await;
            return Err(CaptureError::Io("recorder produced no audio".to_string()));
        }

        let file_name = format!("recording.{}", self.config.extension);
        let mime = match mime_for_extension(&file_name) {
            m if m.starts_with("audio/") => m.to_string(),
            _ => format!("audio/{}", self.config.extension),
        };
        tracing::debug!(bytes = bytes.len(), %mime, "Recording stopped");

        Ok(Recording {
            bytes,
            mime,
            local_url: format!("file://{}", path.display()),
        })
    }

    async fn discard(&self, recording: &Recording) {
        let Some(path) = recording_path(&recording.local_url) else {
            tracing::debug!(url = %recording.local_url, "Not a capture file, nothing to remove");
            return;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "Recording file removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Could not remove recording file"),
        }
    }
}

/// Maps a `file://` URL back to a file this capture created in the temp dir.
fn recording_path(local_url: &str) -> Option<PathBuf> {
    let path = PathBuf::from(local_url.strip_prefix("file://")?);
    let name = path.file_name()?.to_str()?;
    (name.starts_with(FILE_PREFIX) && path.parent()? == std::env::temp_dir().as_path()).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell_config(script: &str) -> CaptureConfig {
        CaptureConfig {
            command: vec!["sh".to_string(), "-c".to_string(), script.to_string(), "recorder".to_string()],
            extension: "wav".to_string(),
        }
    }

    #[tokio::test]
    async fn test_stop_without_start() {
        let capture = ProcessAudioCapture::new(CaptureConfig::default());
        assert!(matches!(capture.stop().await, Err(CaptureError::NotRecording)));
    }

    #[tokio::test]
    async fn test_missing_recorder_is_unavailable() {
        let capture = ProcessAudioCapture::new(CaptureConfig {
            command: vec!["glance-no-such-recorder".to_string()],
            extension: "wav".to_string(),
        });
        assert!(matches!(capture.start().await, Err(CaptureError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_records_file_written_by_command() {
        // `$1` is the output path appended by the capture.
        let capture = ProcessAudioCapture::new(shell_config("printf RIFF > \"$1\"; sleep 30"));

        capture.start().await.unwrap();
        assert!(matches!(capture.start().await, Err(CaptureError::AlreadyRecording)));
        tokio::time::sleep(std::time::Duration::from_millis(300)).await;
        let recording = capture.stop().await.unwrap();

        assert_eq!(recording.bytes, b"RIFF");
        assert_eq!(recording.mime, "audio/wav");
        assert!(recording.local_url.starts_with("file://"));

        let path = recording_path(&recording.local_url).unwrap();
        assert!(path.exists());
        capture.discard(&recording).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_discard_ignores_foreign_files() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let capture = ProcessAudioCapture::new(CaptureConfig::default());
        let recording = Recording {
            bytes: vec![1],
            mime: "audio/wav".to_string(),
            local_url: format!("file://{}", file.path().display()),
        };

        capture.discard(&recording).await;

        assert!(file.path().exists());
        assert!(recording_path("https://cdn.example.com/a.wav").is_none());
    }
}

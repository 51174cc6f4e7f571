//! Composition flow: the authoring state machine that produces a new glance.
//!
//! `Unset -> {Text, Media, Audio} -> Unset`. Submitting or cancelling returns
//! to `Unset`; a failed submission keeps the draft so the user can retry.

use crate::domain::{Glance, GlanceMedia, MediaFile, MediaKind, Recording, User};
use crate::error::DomainError;
use crate::ports::{AiError, AudioCapture, HashtagSuggester, MediaUploader};
use crate::services::{GlanceStore, Recorder};

/// Caption limit for every kind of glance.
pub const MAX_CAPTION_CHARS: usize = 280;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeKind {
    Text,
    Media,
    Audio,
}

/// A selected media file and the hashtag suggestion state around it.
#[derive(Debug, Clone)]
pub struct MediaDraft {
    pub file: MediaFile,
    pub hashtags: Vec<String>,
    pub suggestion_error: Option<String>,
    pub suggesting: bool,
}

#[derive(Debug, Default)]
pub enum ComposeState {
    #[default]
    Unset,
    Text,
    Media(MediaDraft),
    Audio(Recorder),
}

/// Identifies the draft an asynchronous request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftTicket(u64);

/// A hashtag suggestion request ready to send to the AI collaborator.
#[derive(Debug, Clone)]
pub struct HashtagRequest {
    pub ticket: DraftTicket,
    pub data_uri: String,
}

#[derive(Debug, Default)]
pub struct Composer {
    state: ComposeState,
    content: String,
    draft: u64,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ComposeState {
        &self.state
    }

    pub fn kind(&self) -> Option<ComposeKind> {
        match self.state {
            ComposeState::Unset => None,
            ComposeState::Text => Some(ComposeKind::Text),
            ComposeState::Media(_) => Some(ComposeKind::Media),
            ComposeState::Audio(_) => Some(ComposeKind::Audio),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn choose_text(&mut self) -> Result<(), DomainError> {
        self.ensure_unset()?;
        self.state = ComposeState::Text;
        Ok(())
    }

    pub fn choose_audio(&mut self) -> Result<(), DomainError> {
        self.ensure_unset()?;
        self.state = ComposeState::Audio(Recorder::new());
        Ok(())
    }

    /// Pick a file for a media glance. Picking again replaces the file.
    pub fn select_file(&mut self, file: MediaFile) -> Result<(), DomainError> {
        if !matches!(self.state, ComposeState::Unset | ComposeState::Media(_)) {
            return Err(DomainError::Validation(
                "Finish or cancel the current draft first".to_string(),
            ));
        }
        if file.kind().is_none() {
            return Err(unsupported_file(&file));
        }

        tracing::debug!(file = %file.file_name, mime = %file.mime, "Media selected");
        self.draft += 1;
        self.state = ComposeState::Media(MediaDraft {
            file,
            hashtags: Vec::new(),
            suggestion_error: None,
            suggesting: false,
        });
        Ok(())
    }

    /// Append a suggested tag to the caption.
    pub fn append_hashtag(&mut self, tag: &str) {
        self.content = format!("{} {}", self.content, tag).trim().to_string();
    }

    /// Prepare a hashtag suggestion request for the selected image.
    pub fn hashtag_request(&mut self) -> Result<HashtagRequest, DomainError> {
        let ticket = DraftTicket(self.draft);
        let ComposeState::Media(draft) = &mut self.state else {
            return Err(DomainError::Validation("Select an image first".to_string()));
        };
        if draft.file.kind() != Some(MediaKind::Image) {
            return Err(DomainError::Validation(
                "Hashtag suggestions are only available for images".to_string(),
            ));
        }

        draft.suggesting = true;
        draft.suggestion_error = None;
        draft.hashtags.clear();
        Ok(HashtagRequest {
            ticket,
            data_uri: draft.file.to_data_uri(),
        })
    }

    /// Apply a suggestion response. Returns `Ok(false)` when the draft it was
    /// requested for is gone.
    pub fn apply_hashtags(
        &mut self,
        ticket: DraftTicket,
        result: Result<Vec<String>, AiError>,
    ) -> Result<bool, DomainError> {
        if ticket != DraftTicket(self.draft) {
            tracing::debug!("Dropping hashtag response for a stale draft");
            return Ok(false);
        }
        let ComposeState::Media(draft) = &mut self.state else {
            return Ok(false);
        };

        draft.suggesting = false;
        match result {
            Ok(hashtags) => {
                draft.hashtags = hashtags;
                Ok(true)
            }
            Err(e) => {
                draft.suggestion_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Request and apply hashtag suggestions in one step.
    pub async fn suggest_hashtags(
        &mut self,
        suggester: &dyn HashtagSuggester,
    ) -> Result<Vec<String>, DomainError> {
        let request = self.hashtag_request()?;
        let result = suggester.suggest(&request.data_uri).await;
        self.apply_hashtags(request.ticket, result)?;

        match &self.state {
            ComposeState::Media(draft) => Ok(draft.hashtags.clone()),
            _ => Ok(Vec::new()),
        }
    }

    pub async fn start_recording(&mut self, capture: &dyn AudioCapture) -> Result<(), DomainError> {
        self.recorder_mut()?.start(capture).await
    }

    pub async fn stop_recording(&mut self, capture: &dyn AudioCapture) -> Result<(), DomainError> {
        self.recorder_mut()?.stop(capture).await.map(|_| ())
    }

    /// The finished audio take, if composing audio.
    pub fn recording(&self) -> Option<&Recording> {
        match &self.state {
            ComposeState::Audio(recorder) => recorder.recording(),
            _ => None,
        }
    }

    /// Cancel, releasing any finished audio take through `capture`.
    pub async fn discard(&mut self, capture: &dyn AudioCapture) {
        if let ComposeState::Audio(recorder) = &mut self.state {
            recorder.discard(capture).await;
        }
        self.cancel();
    }

    /// Drop the draft and return to `Unset`.
    pub fn cancel(&mut self) {
        self.draft += 1;
        self.state = ComposeState::Unset;
        self.content.clear();
    }

    /// Validate, upload any payload, then build and persist the glance.
    ///
    /// On success the composer is back in `Unset` and the new glance is at
    /// index 0 of the stored list.
    pub async fn submit(
        &mut self,
        author: Option<&User>,
        uploader: &dyn MediaUploader,
        store: &GlanceStore,
    ) -> Result<Glance, DomainError> {
        let author = author.ok_or(DomainError::Unauthenticated)?;

        if self.content.chars().count() > MAX_CAPTION_CHARS {
            return Err(DomainError::Validation(format!(
                "Content must be {MAX_CAPTION_CHARS} characters or fewer"
            )));
        }

        let payload = match &self.state {
            ComposeState::Unset => {
                return Err(DomainError::Validation(
                    "Choose what kind of glance to post".to_string(),
                ));
            }
            ComposeState::Text => {
                if self.content.trim().is_empty() {
                    return Err(DomainError::Validation("Content cannot be empty".to_string()));
                }
                None
            }
            ComposeState::Media(draft) => {
                if draft.file.kind().is_none() {
                    return Err(unsupported_file(&draft.file));
                }
                Some(draft.file.clone())
            }
            ComposeState::Audio(recorder) => match recorder.recording() {
                Some(recording) => Some(recording.clone().into_media_file()),
                None => {
                    return Err(DomainError::Validation("No audio recorded to post".to_string()));
                }
            },
        };

        let media = match payload {
            Some(file) => {
                let uploaded = uploader.upload(&file).await.inspect_err(|e| {
                    tracing::warn!(file = %file.file_name, error = %e, "Upload failed");
                })?;
                tracing::info!(url = %uploaded.url, kind = %uploaded.kind, "Media uploaded");
                GlanceMedia::new(uploaded.kind, uploaded.url)
            }
            None => GlanceMedia::Text,
        };

        let glance = Glance::new(author.clone(), self.content.trim().to_string(), media);
        store.prepend(glance.clone()).await?;
        tracing::info!(glance_id = %glance.id, "Glance published");

        self.cancel();
        Ok(glance)
    }

    fn ensure_unset(&self) -> Result<(), DomainError> {
        match self.state {
            ComposeState::Unset => Ok(()),
            _ => Err(DomainError::Validation(
                "Finish or cancel the current draft first".to_string(),
            )),
        }
    }

    fn recorder_mut(&mut self) -> Result<&mut Recorder, DomainError> {
        match &mut self.state {
            ComposeState::Audio(recorder) => Ok(recorder),
            _ => Err(DomainError::Validation("Not composing an audio glance".to_string())),
        }
    }
}

fn unsupported_file(file: &MediaFile) -> DomainError {
    DomainError::Validation(format!(
        "Unsupported file type {}: choose an image, video or audio file",
        file.mime
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::StoreError;
    use crate::ports::UploadError;
    use crate::seed;
    use crate::services::testing::{FakeCapture, FakeSuggester, FakeUploader, MemoryStore};

    fn author() -> User {
        User::new("u-42", "Glance User", "someone", "https://example.com/me.png")
    }

    fn png() -> MediaFile {
        MediaFile::new("sunset.png", "image/png", vec![1, 2, 3])
    }

    #[tokio::test]
    async fn test_text_glance_lands_at_index_zero() {
        let backend = Arc::new(MemoryStore::new());
        let store = GlanceStore::new(backend);
        let uploader = FakeUploader::ok();
        let mut composer = Composer::new();
        let user = author();

        composer.choose_text().unwrap();
        composer.set_content("Hello");
        let glance = composer.submit(Some(&user), &uploader, &store).await.unwrap();

        let stored = store.load().await.unwrap();
        assert_eq!(stored[0], glance);
        assert_eq!(stored.len(), seed::glances().len() + 1);
        assert_eq!(glance.author.id, "u-42");
        assert_eq!(glance.content, "Hello");
        assert_eq!(glance.media, GlanceMedia::Text);
        assert_eq!(glance.likes, 0);
        assert!(glance.comments.is_empty());
        assert!(composer.kind().is_none());
        assert_eq!(uploader.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_without_collaborators() {
        let backend = Arc::new(MemoryStore::new());
        let store = GlanceStore::new(backend.clone());
        let uploader = FakeUploader::ok();
        let mut composer = Composer::new();

        composer.choose_text().unwrap();
        composer.set_content("   ");
        let result = composer.submit(Some(&author()), &uploader, &store).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(uploader.calls(), 0);
        assert_eq!(backend.writes(), 0);
        assert_eq!(composer.kind(), Some(ComposeKind::Text));
    }

    #[tokio::test]
    async fn test_unsupported_file_is_rejected_before_upload() {
        let mut composer = Composer::new();
        let pdf = MediaFile::new("notes.pdf", "application/pdf", vec![0]);

        let result = composer.select_file(pdf);

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(composer.kind().is_none());
    }

    #[tokio::test]
    async fn test_signed_out_submit_is_rejected() {
        let store = GlanceStore::new(Arc::new(MemoryStore::new()));
        let uploader = FakeUploader::ok();
        let mut composer = Composer::new();
        composer.choose_text().unwrap();
        composer.set_content("Hello");

        let result = composer.submit(None, &uploader, &store).await;
        assert!(matches!(result, Err(DomainError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_caption_limit() {
        let store = GlanceStore::new(Arc::new(MemoryStore::new()));
        let uploader = FakeUploader::ok();
        let mut composer = Composer::new();
        composer.choose_text().unwrap();
        composer.set_content("x".repeat(MAX_CAPTION_CHARS + 1));

        let result = composer.submit(Some(&author()), &uploader, &store).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_media_glance_uses_uploaded_location() {
        let store = GlanceStore::new(Arc::new(MemoryStore::new()));
        let uploader = FakeUploader::ok();
        let mut composer = Composer::new();

        composer.select_file(png()).unwrap();
        composer.set_content("Golden hour");
        let glance = composer.submit(Some(&author()), &uploader, &store).await.unwrap();

        assert_eq!(uploader.calls(), 1);
        assert_eq!(
            glance.media,
            GlanceMedia::Image {
                url: "https://cdn.example.com/media/1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_upload_failure_keeps_draft() {
        let backend = Arc::new(MemoryStore::new());
        let store = GlanceStore::new(backend.clone());
        let uploader = FakeUploader::failing("Upload quota reached");
        let mut composer = Composer::new();
        composer.select_file(png()).unwrap();
        composer.set_content("Golden hour");

        let result = composer.submit(Some(&author()), &uploader, &store).await;

        match result {
            Err(DomainError::Upload(UploadError::Rejected(msg))) => {
                assert_eq!(msg, "Upload quota reached")
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(composer.kind(), Some(ComposeKind::Media));
        assert_eq!(composer.content(), "Golden hour");
        assert_eq!(backend.writes(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_draft() {
        let store = GlanceStore::new(Arc::new(MemoryStore::with_quota(32)));
        let uploader = FakeUploader::ok();
        let mut composer = Composer::new();
        composer.choose_text().unwrap();
        composer.set_content("Hello");

        let result = composer.submit(Some(&author()), &uploader, &store).await;

        assert!(matches!(
            result,
            Err(DomainError::Storage(StoreError::QuotaExceeded { .. }))
        ));
        assert_eq!(composer.kind(), Some(ComposeKind::Text));
    }

    #[tokio::test]
    async fn test_audio_requires_finished_recording() {
        let store = GlanceStore::new(Arc::new(MemoryStore::new()));
        let uploader = FakeUploader::ok();
        let capture = FakeCapture::new();
        let mut composer = Composer::new();
        composer.choose_audio().unwrap();

        let early = composer.submit(Some(&author()), &uploader, &store).await;
        assert!(matches!(early, Err(DomainError::Validation(_))));

        composer.start_recording(&capture).await.unwrap();
        composer.stop_recording(&capture).await.unwrap();
        let glance = composer.submit(Some(&author()), &uploader, &store).await.unwrap();

        assert!(matches!(glance.media, GlanceMedia::Audio { .. }));
        assert_eq!(uploader.last_file().unwrap().file_name, "audio.weba");
    }

    #[tokio::test]
    async fn test_discard_releases_audio_take() {
        let capture = FakeCapture::new();
        let mut composer = Composer::new();
        composer.choose_audio().unwrap();
        composer.start_recording(&capture).await.unwrap();
        composer.stop_recording(&capture).await.unwrap();
        let local_url = composer.recording().unwrap().local_url.clone();

        composer.discard(&capture).await;

        assert!(composer.kind().is_none());
        assert!(composer.recording().is_none());
        assert_eq!(capture.discarded(), vec![local_url]);
    }

    #[tokio::test]
    async fn test_hashtags_append_to_caption() {
        let suggester = FakeSuggester::ok(&["#sunset", "#goldenhour"]);
        let mut composer = Composer::new();
        composer.select_file(png()).unwrap();
        composer.set_content("Evening");

        let tags = composer.suggest_hashtags(&suggester).await.unwrap();
        composer.append_hashtag(&tags[0]);

        assert_eq!(composer.content(), "Evening #sunset");
        assert!(suggester.last_input().unwrap().starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_hashtags_only_for_images() {
        let suggester = FakeSuggester::ok(&["#x"]);
        let mut composer = Composer::new();
        composer
            .select_file(MediaFile::new("clip.mp4", "video/mp4", vec![0]))
            .unwrap();

        let result = composer.suggest_hashtags(&suggester).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(suggester.last_input().is_none());
    }

    #[tokio::test]
    async fn test_hashtag_error_is_kept_on_draft() {
        let suggester = FakeSuggester::failing();
        let mut composer = Composer::new();
        composer.select_file(png()).unwrap();

        let result = composer.suggest_hashtags(&suggester).await;

        assert!(matches!(result, Err(DomainError::Ai(_))));
        let ComposeState::Media(draft) = composer.state() else {
            panic!("still composing media");
        };
        assert!(draft.suggestion_error.is_some());
        assert!(!draft.suggesting);
    }

    #[tokio::test]
    async fn test_stale_hashtag_response_is_dropped() {
        let mut composer = Composer::new();
        composer.select_file(png()).unwrap();
        let request = composer.hashtag_request().unwrap();

        composer.cancel();
        let applied = composer
            .apply_hashtags(request.ticket, Ok(vec!["#late".to_string()]))
            .unwrap();

        assert!(!applied);
        assert!(composer.kind().is_none());
    }

    #[tokio::test]
    async fn test_choose_requires_unset() {
        let mut composer = Composer::new();
        composer.choose_text().unwrap();

        assert!(composer.choose_audio().is_err());
        composer.cancel();
        assert!(composer.choose_audio().is_ok());
    }
}

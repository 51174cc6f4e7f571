//! In-crate fakes of the ports for service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::{MediaFile, Recording};
use crate::error::StoreError;
use crate::ports::{
    AiError, AudioCapture, AuthError, CaptureError, FeedPromptGenerator, HashtagSuggester,
    Identity, IdentityListener, IdentityProvider, KeyValueStore, MediaUploader, SubscriptionId,
    UploadError, UploadedMedia,
};

pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota: usize,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_quota(usize::MAX)
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota,
            writes: AtomicUsize::new(0),
        }
    }

    /// Successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap();
        let others: usize = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        let needed = key.len() + value.len();
        let available = self.quota.saturating_sub(others);
        if needed > available {
            return Err(StoreError::QuotaExceeded { needed, available });
        }
        entries.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

pub struct FakeUploader {
    error: Option<String>,
    calls: AtomicUsize,
    last: Mutex<Option<MediaFile>>,
}

impl FakeUploader {
    pub fn ok() -> Self {
        Self {
            error: None,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::ok()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_file(&self) -> Option<MediaFile> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaUploader for FakeUploader {
    async fn upload(&self, file: &MediaFile) -> Result<UploadedMedia, UploadError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last.lock().unwrap() = Some(file.clone());
        if let Some(message) = &self.error {
            return Err(UploadError::Rejected(message.clone()));
        }
        Ok(UploadedMedia {
            url: format!("https://cdn.example.com/media/{n}"),
            kind: file.kind().ok_or_else(|| UploadError::Rejected("bad type".to_string()))?,
        })
    }
}

pub struct FakeSuggester {
    tags: Option<Vec<String>>,
    last: Mutex<Option<String>>,
}

impl FakeSuggester {
    pub fn ok(tags: &[&str]) -> Self {
        Self {
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            last: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            tags: None,
            last: Mutex::new(None),
        }
    }

    pub fn last_input(&self) -> Option<String> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl HashtagSuggester for FakeSuggester {
    async fn suggest(&self, media_data_uri: &str) -> Result<Vec<String>, AiError> {
        *self.last.lock().unwrap() = Some(media_data_uri.to_string());
        self.tags.clone().ok_or(AiError::BillingRequired)
    }
}

pub struct FakeFeedPrompt {
    glances: Option<Vec<String>>,
    calls: AtomicUsize,
}

impl FakeFeedPrompt {
    pub fn ok(glances: &[&str]) -> Self {
        Self {
            glances: Some(glances.iter().map(|g| g.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            glances: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedPromptGenerator for FakeFeedPrompt {
    async fn generate(&self, _interests: &str) -> Result<Vec<String>, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.glances
            .clone()
            .ok_or_else(|| AiError::Request("model overloaded".to_string()))
    }
}

pub struct FakeCapture {
    denied: bool,
    recording: Mutex<bool>,
    takes: AtomicUsize,
    discarded: Mutex<Vec<String>>,
}

impl FakeCapture {
    pub fn new() -> Self {
        Self {
            denied: false,
            recording: Mutex::new(false),
            takes: AtomicUsize::new(0),
            discarded: Mutex::new(Vec::new()),
        }
    }

    /// `local_url`s of the takes released so far.
    pub fn discarded(&self) -> Vec<String> {
        self.discarded.lock().unwrap().clone()
    }

    pub fn denied() -> Self {
        Self {
            denied: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl AudioCapture for FakeCapture {
    async fn start(&self) -> Result<(), CaptureError> {
        if self.denied {
            return Err(CaptureError::Unavailable("permission denied".to_string()));
        }
        *self.recording.lock().unwrap() = true;
        Ok(())
    }

    async fn stop(&self) -> Result<Recording, CaptureError> {
        let mut recording = self.recording.lock().unwrap();
        if !*recording {
            return Err(CaptureError::NotRecording);
        }
        *recording = false;
        let take = self.takes.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Recording {
            bytes: vec![0x1a, 0x45, 0xdf, 0xa3],
            mime: "audio/webm".to_string(),
            local_url: format!("file:///tmp/take-{take}.webm"),
        })
    }

    async fn discard(&self, recording: &Recording) {
        self.discarded.lock().unwrap().push(recording.local_url.clone());
    }
}

/// Identity provider keeping one account per email, passwords in clear.
pub struct FakeIdentity {
    accounts: Mutex<HashMap<String, (String, Identity)>>,
    current: Mutex<Option<Identity>>,
    listeners: Mutex<Vec<(SubscriptionId, IdentityListener)>>,
    next_id: AtomicU64,
    calls: AtomicUsize,
}

impl FakeIdentity {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            current: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn listeners(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    fn set_current(&self, identity: Option<Identity>) {
        *self.current.lock().unwrap() = identity.clone();
        for (_, listener) in self.listeners.lock().unwrap().iter() {
            listener(identity.as_ref());
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let identity = {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(AuthError::EmailTaken);
            }
            let identity = Identity {
                uid: format!("uid-{}", accounts.len() + 1),
                email: email.to_string(),
                display_name: None,
                photo_url: None,
            };
            accounts.insert(email.to_string(), (password.to_string(), identity.clone()));
            identity
        };
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let identity = match self.accounts.lock().unwrap().get(email) {
            Some((stored, identity)) if stored == password => identity.clone(),
            _ => return Err(AuthError::InvalidCredentials),
        };
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.set_current(None);
        Ok(())
    }

    async fn update_display_name(&self, display_name: &str) -> Result<Identity, AuthError> {
        let mut identity = self.current().ok_or(AuthError::NotSignedIn)?;
        identity.display_name = Some(display_name.to_string());
        if let Some(entry) = self.accounts.lock().unwrap().get_mut(&identity.email) {
            entry.1 = identity.clone();
        }
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    fn current(&self) -> Option<Identity> {
        self.current.lock().unwrap().clone()
    }

    fn subscribe(&self, listener: IdentityListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        listener(self.current().as_ref());
        self.listeners.lock().unwrap().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.lock().unwrap().retain(|(sid, _)| *sid != id);
    }
}

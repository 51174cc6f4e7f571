//! Identity provider backed by the local key-value store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use glance_core::ports::{
    AuthError, Identity, IdentityListener, IdentityProvider, KeyValueStore, SubscriptionId,
};

use super::{Argon2PasswordService, JwtSessionService, SessionConfig};

/// Key holding the JSON map of accounts, by email.
pub const ACCOUNTS_KEY: &str = "accounts";
/// Key holding the signed-in session token.
pub const SESSION_KEY: &str = "session";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Account {
    uid: String,
    email: String,
    password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    photo_url: Option<String>,
}

impl Account {
    fn identity(&self) -> Identity {
        Identity {
            uid: self.uid.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            photo_url: self.photo_url.clone(),
        }
    }
}

pub struct LocalIdentityProvider {
    store: Arc<dyn KeyValueStore>,
    passwords: Argon2PasswordService,
    sessions: JwtSessionService,
    current: RwLock<Option<Identity>>,
    listeners: Mutex<Vec<(SubscriptionId, Arc<IdentityListener>)>>,
    next_subscription: AtomicU64,
}

impl LocalIdentityProvider {
    /// Build the provider and restore a stored session if it is still valid.
    pub async fn restore(
        store: Arc<dyn KeyValueStore>,
        config: SessionConfig,
    ) -> Result<Self, AuthError> {
        let provider = Self {
            store,
            passwords: Argon2PasswordService::new(),
            sessions: JwtSessionService::new(config),
            current: RwLock::new(None),
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        };

        let Some(token) = provider.store.get(SESSION_KEY).await.map_err(backend)? else {
            return Ok(provider);
        };

        match provider.sessions.validate(&token) {
            Ok(claims) => {
                let accounts = provider.accounts().await?;
                match accounts.get(&claims.email).filter(|a| a.uid == claims.sub) {
                    Some(account) => {
                        tracing::debug!(uid = %account.uid, "Session restored");
                        provider.set_current(Some(account.identity()));
                    }
                    None => {
                        tracing::warn!(uid = %claims.sub, "Session refers to an unknown account");
                        provider.store.remove(SESSION_KEY).await.map_err(backend)?;
                    }
                }
            }
            Err(e) => {
                tracing::info!(error = %e, "Discarding stored session");
                provider.store.remove(SESSION_KEY).await.map_err(backend)?;
            }
        }

        Ok(provider)
    }

    async fn accounts(&self) -> Result<HashMap<String, Account>, AuthError> {
        match self.store.get(ACCOUNTS_KEY).await.map_err(backend)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| AuthError::Backend(e.to_string())),
            None => Ok(HashMap::new()),
        }
    }

    async fn save_accounts(&self, accounts: &HashMap<String, Account>) -> Result<(), AuthError> {
        let raw = serde_json::to_string(accounts).map_err(|e| AuthError::Backend(e.to_string()))?;
        self.store.set(ACCOUNTS_KEY, &raw).await.map_err(backend)
    }

    async fn start_session(&self, account: &Account) -> Result<Identity, AuthError> {
        let token = self.sessions.issue(&account.uid, &account.email)?;
        self.store.set(SESSION_KEY, &token).await.map_err(backend)?;
        let identity = account.identity();
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    fn set_current(&self, identity: Option<Identity>) {
        match self.current.write() {
            Ok(mut current) => *current = identity.clone(),
            Err(poisoned) => *poisoned.into_inner() = identity.clone(),
        }

        // Listeners run outside the lock so they may subscribe or unsubscribe.
        let listeners: Vec<Arc<IdentityListener>> = match self.listeners.lock() {
            Ok(listeners) => listeners.iter().map(|(_, l)| l.clone()).collect(),
            Err(poisoned) => poisoned.into_inner().iter().map(|(_, l)| l.clone()).collect(),
        };
        for listener in listeners {
            listener(identity.as_ref());
        }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let mut accounts = self.accounts().await?;
        if accounts.contains_key(email) {
            return Err(AuthError::EmailTaken);
        }

        let account = Account {
            uid: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: self.passwords.hash(password)?,
            display_name: None,
            photo_url: None,
        };
        accounts.insert(email.to_string(), account.clone());
        self.save_accounts(&accounts).await?;
        tracing::info!(uid = %account.uid, "Account created");

        self.start_session(&account).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let accounts = self.accounts().await?;
        let account = accounts.get(email).ok_or(AuthError::InvalidCredentials)?;
        if !self.passwords.verify(password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(uid = %account.uid, "Signed in");
        self.start_session(account).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.store.remove(SESSION_KEY).await.map_err(backend)?;
        self.set_current(None);
        Ok(())
    }

    async fn update_display_name(&self, display_name: &str) -> Result<Identity, AuthError> {
        let current = self.current().ok_or(AuthError::NotSignedIn)?;
        let mut accounts = self.accounts().await?;
        let account = accounts
            .get_mut(&current.email)
            .ok_or(AuthError::NotSignedIn)?;
        account.display_name = Some(display_name.to_string());
        let identity = account.identity();

        self.save_accounts(&accounts).await?;
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    fn current(&self) -> Option<Identity> {
        match self.current.read() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn subscribe(&self, listener: IdentityListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        let listener = Arc::new(listener);
        listener(self.current().as_ref());
        match self.listeners.lock() {
            Ok(mut listeners) => listeners.push((id, listener)),
            Err(poisoned) => poisoned.into_inner().push((id, listener)),
        }
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        match self.listeners.lock() {
            Ok(mut listeners) => listeners.retain(|(sid, _)| *sid != id),
            Err(poisoned) => poisoned.into_inner().retain(|(sid, _)| *sid != id),
        }
    }
}

fn backend(err: glance_core::error::StoreError) -> AuthError {
    AuthError::Backend(err.to_string())
}

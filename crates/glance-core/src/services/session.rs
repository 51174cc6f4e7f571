//! Session context over the identity provider.
//!
//! The session subscribes to identity changes explicitly with [`Session::attach`]
//! and releases the subscription with [`Session::detach`] (or on drop).

use std::sync::{Arc, RwLock};

use crate::domain::User;
use crate::error::{DomainError, StoreError};
use crate::ports::{Identity, IdentityProvider, KeyValueStore, SubscriptionId};
use crate::services::{bio_key, photo_key};

const MIN_PASSWORD_CHARS: usize = 6;

/// Which kind of surface the user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Login and sign-up.
    Auth,
    /// Everything that needs a signed-in user.
    App,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Stay,
    ToLogin,
    ToFeed,
}

pub struct Session {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn KeyValueStore>,
    current: Arc<RwLock<Option<Identity>>>,
    subscription: Option<SubscriptionId>,
}

impl Session {
    pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            provider,
            store,
            current: Arc::new(RwLock::new(None)),
            subscription: None,
        }
    }

    /// Subscribe to identity changes. Idempotent.
    pub fn attach(&mut self) {
        if self.subscription.is_some() {
            return;
        }

        let current = Arc::clone(&self.current);
        let id = self.provider.subscribe(Box::new(move |identity| {
            let mut slot = match current.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *slot = identity.cloned();
        }));
        self.subscription = Some(id);
        tracing::debug!(subscription = id.0, "Session attached");
    }

    pub fn detach(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.provider.unsubscribe(id);
            tracing::debug!(subscription = id.0, "Session detached");
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }

    /// Signed-out users belong on auth surfaces, signed-in users on the app.
    pub fn route(&self, surface: Surface) -> Redirect {
        match (self.is_authenticated(), surface) {
            (false, Surface::App) => Redirect::ToLogin,
            (true, Surface::Auth) => Redirect::ToFeed,
            _ => Redirect::Stay,
        }
    }

    /// The signed-in user as an author record, with local overrides applied.
    pub async fn current_user(&self) -> Result<Option<User>, StoreError> {
        let Some(identity) = self.identity() else {
            return Ok(None);
        };

        let bio = self.store.get(&bio_key(&identity.uid)).await?;
        let local_photo = self.store.get(&photo_key(&identity.uid)).await?;

        let username = identity
            .email
            .split('@')
            .next()
            .filter(|local| !local.is_empty())
            .unwrap_or("user")
            .to_string();
        let avatar_url = local_photo
            .or(identity.photo_url.clone())
            .unwrap_or_else(|| format!("https://picsum.photos/seed/{}/100/100", identity.uid));

        Ok(Some(User {
            id: identity.uid.clone(),
            name: identity
                .display_name
                .clone()
                .unwrap_or_else(|| "Glance User".to_string()),
            username,
            bio: bio.unwrap_or_default(),
            avatar_url,
            interests: Vec::new(),
        }))
    }

    pub async fn require_user(&self) -> Result<User, DomainError> {
        self.current_user().await?.ok_or(DomainError::Unauthenticated)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, DomainError> {
        validate_email(email)?;
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(DomainError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }
        Ok(self.provider.sign_up(email, password).await?)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, DomainError> {
        validate_email(email)?;
        if password.is_empty() {
            return Err(DomainError::Validation("Password is required".to_string()));
        }
        Ok(self.provider.sign_in(email, password).await?)
    }

    pub async fn sign_out(&self) -> Result<(), DomainError> {
        Ok(self.provider.sign_out().await?)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.detach();
    }
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(DomainError::Validation("Please enter a valid email address".to_string()))
    }
}

//! Identity provider port.

use async_trait::async_trait;

/// The signed-in identity as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Listener invoked with the current identity on subscribe and on every change.
pub type IdentityListener = Box<dyn Fn(Option<&Identity>) + Send + Sync>;

/// Handle returned by [`IdentityProvider::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Identity provider trait - sign-up, sign-in and identity change delivery.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and sign it in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Sign in with existing credentials.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Sign out the current identity, if any.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Change the display name of the current identity.
    async fn update_display_name(&self, display_name: &str) -> Result<Identity, AuthError>;

    /// The current identity, if signed in.
    fn current(&self) -> Option<Identity>;

    /// Register a listener. It is called immediately with the current identity.
    fn subscribe(&self, listener: IdentityListener) -> SubscriptionId;

    /// Drop a listener registered with [`IdentityProvider::subscribe`].
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailTaken,

    #[error("No authenticated user")]
    NotSignedIn,

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Identity backend error: {0}")]
    Backend(String),
}

//! Local identity provider: accounts in the key-value store, Argon2 password
//! hashes and a JWT session token.

mod identity;
mod password;
mod session;

pub use identity::{ACCOUNTS_KEY, LocalIdentityProvider, SESSION_KEY};
pub use password::Argon2PasswordService;
pub use session::{JwtSessionService, SessionClaims, SessionConfig};

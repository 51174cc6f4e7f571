//! Services - the client-side content and interaction model.
//!
//! Each service owns its state and talks to collaborators only through the
//! traits in [`crate::ports`].

mod composer;
mod directory;
mod feed;
mod glance_store;
mod interaction;
mod onboarding;
mod profile;
mod recorder;
mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use composer::{ComposeKind, ComposeState, Composer, DraftTicket, HashtagRequest, MAX_CAPTION_CHARS, MediaDraft};
pub use directory::{find_by_username, glances_by};
pub use feed::{CardLayout, CommentAdded, Feed, FeedOrder, FeedView};
pub use glance_store::{GLANCES_BACKUP_KEY, GLANCES_KEY, GlanceStore};
pub use interaction::{CardInteractions, can_follow};
pub use onboarding::{MIN_INTERESTS_CHARS, Onboarding, curator};
pub use profile::{Profiles, bio_key, photo_key};
pub use recorder::{Recorder, RecorderState};
pub use session::{Redirect, Session, Surface};
